//! # Separador Nome / Endereço
//!
//! Decide onde termina o nome (pessoa ou razão social) e começa o endereço.
//! As regras são tentadas em ordem e a primeira que casar vence:
//!
//! 1. Razão social tailandesa: "บริษัท ... จำกัด" (fim do trecho)
//! 2. Razão social latina: "... Co., Ltd" / "... Limited" (fim do trecho)
//! 3. Gatilho de endereço: "เลขที่ 5", "No. 5" ou "123/45" (início do gatilho)
//! 4. Nada casou: o texto todo é nome

use serde::{Deserialize, Serialize};

use crate::consume::starts_word;
use crate::patterns::{self, Patterns};

/// Qual regra definiu o ponto de corte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    NativeEntity,
    LatinEntity,
    AddressTrigger,
    EndOfText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPoint {
    /// Índice de byte em que o endereço começa.
    pub index: usize,
    pub rule: SplitRule,
}

/// Índice de corte com a localidade padrão.
pub fn find_split_point(text: &str) -> usize {
    locate_split(&patterns::thai(), text).index
}

pub fn locate_split(patterns: &Patterns, text: &str) -> SplitPoint {
    if let Some(m) = patterns.entity_native.as_ref().and_then(|re| re.find(text)) {
        return SplitPoint { index: m.end(), rule: SplitRule::NativeEntity };
    }

    if let Some(m) = patterns.entity_latin.as_ref().and_then(|re| re.find(text)) {
        return SplitPoint { index: m.end(), rule: SplitRule::LatinEntity };
    }

    let trigger = patterns.address_trigger.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        match caps.name("label") {
            Some(label) if !starts_word(text, label.start()) => None,
            _ => Some(whole.start()),
        }
    });
    if let Some(index) = trigger {
        return SplitPoint { index, rule: SplitRule::AddressTrigger };
    }

    SplitPoint { index: text.len(), rule: SplitRule::EndOfText }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> (String, String, SplitRule) {
        let point = locate_split(&patterns::thai(), text);
        (
            text[..point.index].trim().to_string(),
            text[point.index..].trim().to_string(),
            point.rule,
        )
    }

    #[test]
    fn test_native_entity_span() {
        let (name, address, rule) = split("บริษัท ทดสอบ จำกัด 123/45 ถนนสุขุมวิท");
        assert_eq!(name, "บริษัท ทดสอบ จำกัด");
        assert_eq!(address, "123/45 ถนนสุขุมวิท");
        assert_eq!(rule, SplitRule::NativeEntity);
    }

    #[test]
    fn test_native_public_company_suffix() {
        let (name, _, _) = split("บริษัท ปูนซิเมนต์ไทย จำกัด (มหาชน) 1 ถนนปูนซิเมนต์ไทย");
        assert_eq!(name, "บริษัท ปูนซิเมนต์ไทย จำกัด (มหาชน)");
    }

    #[test]
    fn test_partnership_without_closing_marker_falls_through() {
        let (name, address, rule) = split("ห้างหุ้นส่วนจำกัด สมชายการค้า 99/1 หมู่ 2");
        assert_eq!(name, "ห้างหุ้นส่วนจำกัด สมชายการค้า");
        assert_eq!(address, "99/1 หมู่ 2");
        assert_eq!(rule, SplitRule::AddressTrigger);
    }

    #[test]
    fn test_latin_entity_span() {
        let (name, address, rule) = split("Acme Trading Co., Ltd. 99/1 Moo 3 Soi 5");
        assert_eq!(name, "Acme Trading Co., Ltd.");
        assert_eq!(address, "99/1 Moo 3 Soi 5");
        assert_eq!(rule, SplitRule::LatinEntity);

        let (name, _, _) = split("SIAM GOODS LIMITED No. 7 Rama 9 Road");
        assert_eq!(name, "SIAM GOODS LIMITED");
    }

    #[test]
    fn test_house_label_trigger() {
        let (name, address, _) = split("สมหญิง ใจดี เลขที่ 88 ถนนพหลโยธิน");
        assert_eq!(name, "สมหญิง ใจดี");
        assert_eq!(address, "เลขที่ 88 ถนนพหลโยธิน");

        let (name, address, _) = split("John Smith No. 12 Silom Road");
        assert_eq!(name, "John Smith");
        assert_eq!(address, "No. 12 Silom Road");
    }

    #[test]
    fn test_house_label_needs_word_boundary() {
        let (name, _, rule) = split("Techno 5 Shop");
        assert_eq!(name, "Techno 5 Shop");
        assert_eq!(rule, SplitRule::EndOfText);
    }

    #[test]
    fn test_no_marker_keeps_everything_as_name() {
        assert_eq!(find_split_point("hello world"), "hello world".len());
        assert_eq!(find_split_point(""), 0);
    }
}
