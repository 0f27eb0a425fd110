pub mod daily_words;
pub mod llm_provider;
pub mod quiz_generator;
pub mod sentence_grader;
