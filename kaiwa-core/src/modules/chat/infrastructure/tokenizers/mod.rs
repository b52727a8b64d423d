// Chat Infrastructure - Tokenizers
//
// 分词端口的具体实现

mod heuristic_tokenizer;

pub use heuristic_tokenizer::*;
