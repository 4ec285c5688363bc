pub mod puzzle;
pub mod words;

pub use puzzle::PuzzleQuery;
pub use words::{
    AlphabeticResponse, AnagramQuery, AnagramsResponse, PrefixResponse, RandomAnagramQuery,
    RandomAnagramResponse, RandomWordQuery, RandomWordResponse, TemplateFitQuery,
    TemplateFitResponse, TemplateQuery, TemplateResponse, WordInfo,
};
