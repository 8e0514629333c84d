//! # addrparse-core — Extração de Endereços e Contatos em Texto Livre
//!
//! Este crate transforma um texto colado pelo usuário (cartão de visita
//! tailandês ou inglês, mensagem de chat, bloco de endereço de nota fiscal)
//! num registro plano com nome, telefone, e-mail, tax ID, CEP, rua, soi,
//! subdistrito etc.
//!
//! ## Arquitetura do Sistema
//!
//! O pipeline é linear e cada etapa **consome** o que reconhece, de modo que
//! nenhum trecho do texto pode ser atribuído a dois campos:
//!
//! 1.  **Normalização** ([`normalize`]): remove caracteres invisíveis, converte dígitos tailandeses.
//! 2.  **Tokens Globais** ([`tokens`]): tax ID, telefone, e-mail, mapa, LINE, filial e CEP.
//! 3.  **Separação** ([`splitter`]): onde termina o nome (razão social) e começa o endereço.
//! 4.  **Componentes** ([`components`]): província, distrito, subdistrito, rua, soi, moo, número, prédio.
//! 5.  **Montagem** ([`pipeline`]): junta tudo num [`ParsedAddress`], com fallback para o nome.
//!
//! Todas as expressões regulares saem das tabelas de uma [`Locale`]
//! ([`locale::THAI`] é a padrão) e são compiladas uma única vez em [`Patterns`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use addrparse_core::parse_universal_address;
//!
//! let record = parse_universal_address(
//!     "บริษัท ทดสอบ จำกัด 123/45 ถนนสุขุมวิท เขตบางนา กทม. 10260 โทร 02-123-4567",
//! );
//! assert_eq!(record.name, "บริษัท ทดสอบ จำกัด");
//! assert_eq!(record.road, "สุขุมวิท");
//! assert_eq!(record.province, "กรุงเทพมหานคร");
//! assert_eq!(record.zipcode, "10260");
//! assert_eq!(record.phone, "021234567");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: [`AddressParser`], eventos de streaming e processamento em lote.
//! - [`consume`]: o acumulador `Consumed` compartilhado por todas as etapas.
//! - [`patterns`]: compilação das tabelas de rótulos em expressões regulares.
//! - [`samples`]: textos de demonstração.

pub mod components;
pub mod consume;
pub mod error;
pub mod locale;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod record;
pub mod samples;
pub mod splitter;
pub mod tokens;

pub use components::extract_address_components;
pub use error::ParserError;
pub use locale::{LabelSet, Locale};
pub use patterns::Patterns;
pub use pipeline::{parse_universal_address, AddressParser, ParseEvent, ParserOptions};
pub use record::{AddressComponents, Field, GlobalTokens, ParsedAddress};
pub use splitter::{find_split_point, SplitPoint, SplitRule};
pub use tokens::extract_global_tokens;
