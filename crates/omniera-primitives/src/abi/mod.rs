pub mod lsp;
pub mod marketplace;
