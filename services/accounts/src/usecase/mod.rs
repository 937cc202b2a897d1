pub mod issue;
pub mod register;
pub mod token;
pub mod verify;

/// Returned for both known and unknown emails so the code-request endpoints
/// cannot be used to probe which addresses are registered.
pub const CODE_SENT_MESSAGE: &str = "If the email is registered, a verification code has been sent";

pub const ALREADY_VERIFIED_MESSAGE: &str = "Email is already verified";
