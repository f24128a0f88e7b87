pub mod answer;
pub mod inspection;
pub mod photo;
pub mod question;
