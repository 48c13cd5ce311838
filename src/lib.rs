pub mod cache;
pub mod conditions;
pub mod error;
pub mod gene_expression;
pub mod mirbase;
pub mod mirna_expression;
pub mod reader;
pub mod record;
pub mod rows;
pub mod run;
pub mod sink;
