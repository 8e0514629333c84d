//! # Conjunto de Padrões Compilados
//!
//! Todas as expressões regulares do pipeline são geradas a partir das tabelas
//! de um [`Locale`] e compiladas uma única vez. Os rótulos são escapados com
//! `regex::escape`, então uma tabela nova nunca injeta sintaxe de regex
//! (exceto `latin_entity_close`, que já é fragmento regex por definição).

use std::cmp::Reverse;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::ParserError;
use crate::locale::{LabelSet, Locale, THAI};
use crate::record::Field;

/// Valor de um único token: vai até o próximo espaço ou separador.
const TOKEN_VALUE: &str = r"[^\s,;()]+";
/// Soi aceita um sub-token numérico ("ซอยสุขุมวิท 101").
const LANE_VALUE: &str = r"[^\s,;()]+(?:\s+[0-9]+)?";
/// Depois do soi não pode vir o resto de um número de casa ("ซอยสุขใจ 12/3").
const LANE_TAIL: &str = r"(?:[^0-9/]|$)";
const NUMERIC_VALUE: &str = r"[0-9]+";
const HOUSE_VALUE: &str = r"[0-9]+(?:\s*/\s*[0-9]+)?";

/// Serviços de mapa reconhecidos como link de localização.
const MAP_LINK: &str = r"(?i)https?://(?:www\.)?(?:maps\.app\.goo\.gl|goo\.gl/maps|maps\.google\.[a-z.]+|google\.[a-z.]+/maps|maps\.apple\.com)\S*";

/// Rótulo seguido (opcionalmente) de um valor, ex: "ถนนสุขุมวิท", "Soi 5".
#[derive(Debug, Clone)]
pub struct LabeledRule {
    pub field: Field,
    /// Grupos nomeados: `label` (sempre) e `value` (opcional).
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct Patterns {
    pub locale: Locale,

    pub digit_run: Regex,
    pub taxid_label_tail: Option<Regex>,
    pub phone: Regex,
    pub email: Regex,
    pub maps: Regex,
    pub chat: Option<Regex>,
    pub head_office: Option<Regex>,
    pub branch: Option<Regex>,

    pub entity_native: Option<Regex>,
    pub entity_latin: Option<Regex>,
    pub address_trigger: Regex,

    pub province: Option<LabeledRule>,
    pub capital: Option<Regex>,
    pub district: Option<LabeledRule>,
    pub subdistrict: Option<LabeledRule>,
    pub road: Option<LabeledRule>,
    /// Rótulos pós-fixados ("Silom Road"); o nome é lido palavra a palavra com `word`.
    pub road_suffix: Option<Regex>,
    pub district_suffix: Option<Regex>,
    pub subdistrict_suffix: Option<Regex>,
    pub word: Regex,
    pub lane: Option<LabeledRule>,
    pub villageno: Option<LabeledRule>,
    pub house: Option<LabeledRule>,
    pub house_unlabeled: Regex,
    pub label_prefix: Option<Regex>,
    pub building_prefix: Option<Regex>,

    pub name_native_prefix: Option<Regex>,
    pub name_latin_prefix: Option<Regex>,
}

static THAI_PATTERNS: LazyLock<Arc<Patterns>> = LazyLock::new(|| {
    Arc::new(Patterns::compile(&THAI).expect("tabelas tailandesas embutidas compilam"))
});

/// Padrões da localidade padrão (compilados na primeira chamada).
pub fn thai() -> Arc<Patterns> {
    Arc::clone(&THAI_PATTERNS)
}

fn build(pattern: &'static str, source: String) -> Result<Regex, ParserError> {
    Regex::new(&source).map_err(|e| ParserError::Pattern { pattern, source: e })
}

fn longest_first<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut sorted: Vec<&str> = labels.filter(|l| !l.is_empty()).collect();
    sorted.sort_by_key(|l| Reverse(l.chars().count()));
    sorted
}

fn escape_latin(label: &str) -> String {
    regex::escape(label).replace(' ', r"\s*")
}

/// `(?:nativo1|nativo2|(?i:latin1|latin2)\b\.?)`, ou `None` se o conjunto é vazio.
fn alternation(set: &LabelSet) -> Option<String> {
    alternation_of(set.native, set.latin)
}

fn alternation_of(native: &[&str], latin: &[&str]) -> Option<String> {
    let mut parts: Vec<String> = longest_first(native.iter().copied())
        .into_iter()
        .map(regex::escape)
        .collect();
    let latin: Vec<String> = longest_first(latin.iter().copied())
        .into_iter()
        .map(escape_latin)
        .collect();
    if !latin.is_empty() {
        parts.push(format!(r"(?i:{})\b\.?", latin.join("|")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("(?:{})", parts.join("|")))
    }
}

fn literal_alternation(words: &[&str]) -> Option<String> {
    let sorted = longest_first(words.iter().copied());
    if sorted.is_empty() {
        return None;
    }
    let escaped: Vec<String> = sorted.into_iter().map(regex::escape).collect();
    Some(format!("(?:{})", escaped.join("|")))
}

fn labeled(
    pattern: &'static str,
    field: Field,
    set: &LabelSet,
    value: &str,
    tail: &str,
) -> Result<Option<LabeledRule>, ParserError> {
    let Some(labels) = alternation(set) else {
        return Ok(None);
    };
    let regex = build(pattern, format!(r"(?P<label>{labels})\s*[:：]?\s*(?P<value>{value})?{tail}"))?;
    Ok(Some(LabeledRule { field, regex }))
}

/// Só os rótulos latinos de `set` que podem vir depois do valor.
fn suffix_labels(pattern: &'static str, set: &LabelSet, suffixes: &[&str]) -> Result<Option<Regex>, ParserError> {
    let latin: Vec<&str> = set.latin.iter().copied().filter(|l| suffixes.contains(l)).collect();
    alternation_of(&[], &latin).map(|a| build(pattern, a)).transpose()
}

impl Patterns {
    pub fn compile(locale: &Locale) -> Result<Self, ParserError> {
        // === Tokens globais ===
        let taxid_label_tail = alternation(&locale.taxid_labels)
            .map(|l| build("taxid_label", format!(r"(?P<label>{l})\s*[:：.]?\s*$")))
            .transpose()?;

        let leading = if locale.phone_country_prefix.is_empty() {
            "0".to_string()
        } else {
            format!(r"(?:{}[\s\-]*|0)", regex::escape(locale.phone_country_prefix))
        };
        let number = format!(r"{leading}[0-9]{{1,2}}[\- ]?[0-9]{{3}}[\- ]?[0-9]{{3,4}}");
        let phone = match alternation(&locale.phone_labels) {
            Some(l) => format!(r"(?:(?P<label>{l})\s*[:：]?\s*)?(?P<value>{number})"),
            None => format!(r"(?P<value>{number})"),
        };

        let address = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}";
        let email = match alternation(&locale.email_labels) {
            Some(l) => format!(r"(?:(?P<label>{l})\s*[:：]?\s*)?(?P<value>{address})"),
            None => format!(r"(?P<value>{address})"),
        };

        let chat = alternation(&locale.chat_labels)
            .map(|l| {
                build(
                    "chat",
                    format!(r"(?P<label>{l})\s*(?:[:：\-]\s*(?P<value>@?[A-Za-z0-9._\-]+)|(?P<at>@[A-Za-z0-9._\-]+))"),
                )
            })
            .transpose()?;

        let head_office = alternation(&locale.head_office_labels)
            .map(|l| build("head_office", format!(r"\(?\s*(?P<label>{l})\s*\)?")))
            .transpose()?;

        let branch = alternation(&locale.branch_labels)
            .map(|l| {
                build(
                    "branch",
                    format!(r"\(?\s*(?P<label>{l})\s*[:：]?\s*(?P<value>[A-Za-z0-9][A-Za-z0-9\-]*)\s*\)?"),
                )
            })
            .transpose()?;

        // === Separação ===
        let entity_native = match (
            literal_alternation(locale.entity_open),
            literal_alternation(locale.entity_close),
        ) {
            (Some(open), Some(close)) => {
                let suffix = literal_alternation(locale.entity_close_suffix)
                    .map(|s| format!(r"(?:\s*{s})?"))
                    .unwrap_or_default();
                Some(build("entity_native", format!(r"{open}[^\n]{{1,120}}?{close}{suffix}"))?)
            }
            _ => None,
        };

        let entity_latin = if locale.latin_entity_close.is_empty() {
            None
        } else {
            Some(build(
                "entity_latin",
                format!(r"(?i)\b(?:{})", locale.latin_entity_close.join("|")),
            )?)
        };

        let address_trigger = match alternation(&locale.house_labels) {
            Some(l) => format!(r"(?P<label>{l})\s*[:：]?\s*[0-9]|[0-9]+\s*/\s*[0-9]+"),
            None => r"[0-9]+\s*/\s*[0-9]+".to_string(),
        };

        // === Componentes ===
        let capital = alternation(&locale.capital_synonyms)
            .map(|l| build("capital", l))
            .transpose()?;

        let mut native_labels: Vec<&'static str> = Vec::new();
        let mut latin_labels: Vec<&'static str> = Vec::new();
        for set in [
            &locale.province_labels,
            &locale.district_labels,
            &locale.subdistrict_labels,
            &locale.road_labels,
            &locale.lane_labels,
            &locale.villageno_labels,
            &locale.house_labels,
            &locale.building_labels,
        ] {
            native_labels.extend_from_slice(set.native);
            latin_labels.extend_from_slice(set.latin);
        }
        let label_prefix = alternation_of(&native_labels, &latin_labels)
            .map(|a| build("label_prefix", format!("^{a}")))
            .transpose()?;

        let building_prefix = alternation(&locale.building_labels)
            .map(|l| build("building_prefix", format!(r"^{l}\s*[:：]?\s*")))
            .transpose()?;

        let name_native_prefix = literal_alternation(locale.name_labels.native)
            .map(|l| build("name_native", format!(r"^{l}(?:\s*[:：]\s*|\s+)")))
            .transpose()?;
        let name_latin_prefix = if locale.name_labels.latin.is_empty() {
            None
        } else {
            let latin: Vec<String> = longest_first(locale.name_labels.latin.iter().copied())
                .into_iter()
                .map(escape_latin)
                .collect();
            Some(build("name_latin", format!(r"^(?i:{})\s*[:：]\s*", latin.join("|")))?)
        };

        Ok(Self {
            locale: *locale,
            digit_run: build("digit_run", "[0-9]+".to_string())?,
            taxid_label_tail,
            phone: build("phone", phone)?,
            email: build("email", email)?,
            maps: build("maps", MAP_LINK.to_string())?,
            chat,
            head_office,
            branch,
            entity_native,
            entity_latin,
            address_trigger: build("address_trigger", address_trigger)?,
            province: labeled("province", Field::Province, &locale.province_labels, TOKEN_VALUE, "")?,
            capital,
            district: labeled("district", Field::District, &locale.district_labels, TOKEN_VALUE, "")?,
            subdistrict: labeled("subdistrict", Field::Subdistrict, &locale.subdistrict_labels, TOKEN_VALUE, "")?,
            road: labeled("road", Field::Road, &locale.road_labels, TOKEN_VALUE, "")?,
            road_suffix: suffix_labels("road_suffix", &locale.road_labels, locale.suffix_labels)?,
            district_suffix: suffix_labels("district_suffix", &locale.district_labels, locale.suffix_labels)?,
            subdistrict_suffix: suffix_labels("subdistrict_suffix", &locale.subdistrict_labels, locale.suffix_labels)?,
            word: build("word", TOKEN_VALUE.to_string())?,
            lane: labeled("lane", Field::Lane, &locale.lane_labels, LANE_VALUE, LANE_TAIL)?,
            villageno: labeled("villageno", Field::VillageNo, &locale.villageno_labels, NUMERIC_VALUE, "")?,
            house: labeled("house", Field::Number, &locale.house_labels, HOUSE_VALUE, "")?,
            house_unlabeled: build("house_unlabeled", HOUSE_VALUE.to_string())?,
            label_prefix,
            building_prefix,
            name_native_prefix,
            name_latin_prefix,
        })
    }
}
