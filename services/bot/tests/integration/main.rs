mod helpers;

mod membership_test;
mod webhook_test;
