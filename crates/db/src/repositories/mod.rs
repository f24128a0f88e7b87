mod answer_repo;
mod inspection_repo;
mod photo_repo;
mod question_repo;

pub use answer_repo::AnswerRepo;
pub use inspection_repo::InspectionRepo;
pub use photo_repo::PhotoRepo;
pub use question_repo::QuestionRepo;
