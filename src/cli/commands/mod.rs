pub mod config;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod prefs;
pub mod show;
pub mod subscribe;
pub mod watch;
