pub mod demo;
pub mod lists;
pub mod normalize;
pub mod profile;
pub mod similarity;
pub mod text;

pub use demo::Demo;
pub use lists::ParsedList;
pub use normalize::{Location, NormalizerTables};
pub use profile::{Profile, ProfileNormalizer, RawProfile};
pub use text::{Bag, StopwordTokenizer, Tokenizer, WordTokenizer};
