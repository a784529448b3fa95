mod local_answer_service;

pub use local_answer_service::{reply_to, LocalAnswerService, LOCAL_ANSWER_TTL};
