//! Configuração via variáveis de ambiente (um `.env` é carregado antes).

use std::str::FromStr;

use tracing::warn;

/// Configuração do servidor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `ADDRPARSE_BIND`
    pub bind: String,
    /// `ADDRPARSE_NAME_MAX`
    pub name_max_graphemes: usize,
    /// `ADDRPARSE_MAX_INPUT_BYTES`
    pub max_input_bytes: usize,
    /// `ADDRPARSE_MAX_BATCH`
    pub max_batch: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            name_max_graphemes: 100,
            max_input_bytes: 64 * 1024,
            max_batch: 500,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Valores inválidos não derrubam o servidor: viram o padrão com um aviso.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: lookup("ADDRPARSE_BIND")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.bind),
            name_max_graphemes: parse_or(&lookup, "ADDRPARSE_NAME_MAX", defaults.name_max_graphemes),
            max_input_bytes: parse_or(&lookup, "ADDRPARSE_MAX_INPUT_BYTES", defaults.max_input_bytes),
            max_batch: parse_or(&lookup, "ADDRPARSE_MAX_BATCH", defaults.max_batch),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "valor inválido, usando o padrão");
            default
        }
    }
}
