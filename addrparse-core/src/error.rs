use thiserror::Error;

/// Falhas possíveis ao montar um parser.
///
/// A extração em si nunca falha: só a compilação das tabelas de um
/// [`crate::locale::Locale`] customizado pode produzir um padrão inválido.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("padrão '{pattern}' inválido: {source}")]
    Pattern {
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
}
