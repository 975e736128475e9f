pub mod history_testkit;
