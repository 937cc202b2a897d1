mod helpers;
mod reset_password_test;
