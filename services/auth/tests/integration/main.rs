mod helpers;

mod code_test;
