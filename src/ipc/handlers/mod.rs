pub mod core;
pub mod directory;
pub mod login;
pub mod session;
pub mod student;
pub mod student_login;
pub mod teacher;
