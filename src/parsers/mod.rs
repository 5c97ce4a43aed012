pub mod declaration;
pub mod feature_file;

pub use declaration::{parse_ambiguity_list, parse_declaration, tokenize, Declaration};
pub use feature_file::{FeatureParser, LineDiagnostic, ParserOptions};
