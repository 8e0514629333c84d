//! # Pipeline — Montagem do Resultado com Eventos Observáveis
//!
//! Coordena as etapas (normalização, tokens globais, separação, componentes)
//! e pode emitir um evento a cada passo via `mpsc`, para que o servidor
//! WebSocket mostre o progresso da extração em tempo real.
//!
//! ```rust
//! use addrparse_core::parse_universal_address;
//!
//! let record = parse_universal_address("คุณสมชาย 081-234-5678");
//! assert_eq!(record.name, "คุณสมชาย");
//! assert_eq!(record.phone, "0812345678");
//! ```

use std::sync::mpsc;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::components::run_component_pass;
use crate::consume::{collapse_whitespace, remove_occurrences};
use crate::error::ParserError;
use crate::locale::Locale;
use crate::normalize::{first_line, normalize_input};
use crate::patterns::{self, Patterns};
use crate::record::{Field, ParsedAddress};
use crate::splitter::{locate_split, SplitRule};
use crate::tokens::run_token_pass;

/// Ajustes do parser que não fazem parte das tabelas de rótulos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Tamanho máximo do nome, em grafemas (marcas tailandesas nunca são cortadas).
    pub name_max_graphemes: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { name_max_graphemes: 100 }
    }
}

/// Eventos emitidos durante o processamento, na ordem do pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ParseEvent {
    /// Texto depois da normalização.
    Normalized { text: String },
    /// Um token global foi reivindicado.
    TokenExtracted { field: Field, value: String },
    /// Fim da extração global: o texto que sobrou para nome + endereço.
    TokensDone { cleaned: String },
    SplitFound { index: usize, rule: SplitRule },
    ComponentExtracted { field: Field, value: String },
    /// `fallback` indica que o nome veio da primeira linha da entrada.
    NameResolved { name: String, fallback: bool },
    Done {
        record: ParsedAddress,
        processing_us: u64,
    },
}

/// O parser principal. Barato de clonar: os padrões ficam num `Arc`.
///
/// É `Send + Sync` e não guarda estado entre chamadas, então pode ser
/// compartilhado entre threads sem trava.
#[derive(Debug, Clone)]
pub struct AddressParser {
    patterns: Arc<Patterns>,
    options: ParserOptions,
}

static DEFAULT_PARSER: LazyLock<AddressParser> = LazyLock::new(AddressParser::new);

/// Ponto de entrada: extrai todos os campos com a localidade padrão.
///
/// Total sobre qualquer string; um campo não encontrado fica vazio.
pub fn parse_universal_address(text: &str) -> ParsedAddress {
    DEFAULT_PARSER.parse(text)
}

impl AddressParser {
    /// Parser tailandês com as opções padrão.
    pub fn new() -> Self {
        Self {
            patterns: patterns::thai(),
            options: ParserOptions::default(),
        }
    }

    /// Compila as tabelas de outra localidade.
    pub fn with_locale(locale: &Locale, options: ParserOptions) -> Result<Self, ParserError> {
        Ok(Self {
            patterns: Arc::new(Patterns::compile(locale)?),
            options,
        })
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    pub fn parse(&self, text: &str) -> ParsedAddress {
        self.run(text, &mut |_| {})
    }

    /// Igual a [`Self::parse`], mas envia cada [`ParseEvent`] por `tx`.
    /// Um receptor já fechado não interrompe a extração.
    pub fn parse_streaming(&self, text: &str, tx: mpsc::Sender<ParseEvent>) -> ParsedAddress {
        self.run(text, &mut |event| {
            let _ = tx.send(event);
        })
    }

    /// Processa vários textos em paralelo, preservando a ordem de entrada.
    pub fn parse_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<ParsedAddress> {
        texts.par_iter().map(|text| self.parse(text.as_ref())).collect()
    }

    fn run(&self, text: &str, emit: &mut dyn FnMut(ParseEvent)) -> ParsedAddress {
        let start = Instant::now();
        let patterns = self.patterns.as_ref();

        // 1. Normalização
        let normalized = normalize_input(text);
        emit(ParseEvent::Normalized { text: normalized.clone() });

        // 2. Tokens globais
        let pass = run_token_pass(patterns, &normalized, &mut |field, value| {
            emit(ParseEvent::TokenExtracted { field, value: value.to_string() });
        });
        emit(ParseEvent::TokensDone { cleaned: pass.cleaned.clone() });

        // 3-4. Separação nome / endereço
        let split = locate_split(patterns, &pass.cleaned);
        emit(ParseEvent::SplitFound { index: split.index, rule: split.rule });
        let (name_part, address_part) = pass.cleaned.split_at(split.index);

        // 5. Componentes
        let components = run_component_pass(patterns, address_part, &mut |field, value| {
            emit(ParseEvent::ComponentExtracted { field, value: value.to_string() });
        });

        // 6. Nome
        let candidate = self.tidy_name(name_part);
        let fallback = candidate.is_empty();
        let name = if fallback {
            self.fallback_name(&normalized, &pass.claimed)
        } else {
            candidate
        };
        emit(ParseEvent::NameResolved { name: name.clone(), fallback });

        // 7. Montagem
        let record = ParsedAddress::assemble(name, pass.tokens, components);
        emit(ParseEvent::Done {
            record: record.clone(),
            processing_us: start.elapsed().as_micros() as u64,
        });
        record
    }

    /// Primeira linha da entrada sem os tokens já reivindicados.
    fn fallback_name(&self, normalized: &str, claimed: &[String]) -> String {
        let line = claimed
            .iter()
            .fold(first_line(normalized).to_string(), |line, span| remove_occurrences(&line, span));
        self.tidy_name(&line)
    }

    /// Remove o rótulo "ชื่อ:"/"Name:" e aplica o limite de tamanho.
    fn tidy_name(&self, raw: &str) -> String {
        let mut name = collapse_whitespace(raw);
        for prefix in [&self.patterns.name_native_prefix, &self.patterns.name_latin_prefix]
            .into_iter()
            .flatten()
        {
            if let Some(m) = prefix.find(&name) {
                name = name[m.end()..].to_string();
                break;
            }
        }
        let capped: String = name.graphemes(true).take(self.options.name_max_graphemes).collect();
        capped.trim().to_string()
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}
