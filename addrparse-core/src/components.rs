//! # Extrator de Componentes do Endereço
//!
//! Roda apenas sobre o trecho de endereço. Cada componente rotulado é
//! procurado, extraído e **removido** antes do próximo, na ordem:
//!
//! província → distrito → subdistrito → rua → soi → moo → número → resto
//!
//! O que sobra no final (sem números soltos nem pontuação) é o nome do
//! condomínio/prédio/vila.
//!
//! ## Rótulo sem valor
//!
//! Se um rótulo aparece isolado ("ถนน" no fim do texto) ou seguido de outro
//! rótulo ("ถนน ซอยร่วมฤดี"), o campo fica vazio mas o rótulo é removido,
//! para não vazar para o campo `village`.

use std::ops::Range;

use regex::Regex;

use crate::consume::{collapse_whitespace, is_standalone, is_word_char, next_char, starts_word, Consumed};
use crate::patterns::{self, LabeledRule, Patterns};
use crate::record::{AddressComponents, Field};

pub type ComponentStep = fn(&Patterns, &str) -> Consumed;

const MAX_SUFFIXED_WORDS: usize = 3;
const SEGMENT_BREAKS: &[char] = &[',', ';', '(', ')', '\n'];

pub const COMPONENT_ORDER: [(Field, ComponentStep); 8] = [
    (Field::Province, take_province),
    (Field::District, take_district),
    (Field::Subdistrict, take_subdistrict),
    (Field::Road, take_road),
    (Field::Lane, take_lane),
    (Field::VillageNo, take_villageno),
    (Field::Number, take_house_number),
    (Field::Village, take_remainder),
];

/// Extrai os componentes com a localidade padrão.
pub fn extract_address_components(address: &str) -> AddressComponents {
    run_component_pass(&patterns::thai(), address, &mut |_, _| {})
}

pub fn run_component_pass(
    patterns: &Patterns,
    address: &str,
    on_component: &mut dyn FnMut(Field, &str),
) -> AddressComponents {
    let mut components = AddressComponents::default();
    let mut working = address.to_string();

    for (field, step) in COMPONENT_ORDER {
        let consumed = step(patterns, &working);
        if consumed.found() {
            on_component(field, &consumed.value);
            components.set(field, consumed.value);
        }
        working = consumed.rest;
    }
    components
}

/// Encadeia `next` (aplicado sobre `self.rest`) preservando os trechos já removidos.
fn chain(mut first: Consumed, next: Consumed) -> Consumed {
    first.claimed.extend(next.claimed);
    first.value = next.value;
    first.rest = next.rest;
    first
}

fn tidy_value(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', ':', '-'])
        .trim()
        .to_string()
}

fn starts_with_label(patterns: &Patterns, value: &str) -> bool {
    patterns
        .label_prefix
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

fn stands_alone(text: &str, label_end: usize) -> bool {
    !next_char(text, label_end).is_some_and(is_word_char)
}

/// Núcleo das regras rotuladas: o primeiro rótulo com valor válido vence;
/// sem nenhum, o primeiro rótulo isolado é descartado.
fn take_labeled(patterns: &Patterns, rule: Option<&LabeledRule>, text: &str) -> Consumed {
    let Some(rule) = rule else {
        return Consumed::untouched(text);
    };

    let mut orphan: Option<Range<usize>> = None;
    for caps in rule.regex.captures_iter(text) {
        let Some(label) = caps.name("label") else {
            continue;
        };
        if !starts_word(text, label.start()) {
            continue;
        }
        match caps.name("value") {
            Some(value) => {
                let cleaned = tidy_value(value.as_str());
                if !cleaned.is_empty() && !starts_with_label(patterns, &cleaned) {
                    return Consumed::claim(text, label.start()..value.end(), cleaned);
                }
                orphan.get_or_insert(label.range());
            }
            None if stands_alone(text, label.end()) => {
                orphan.get_or_insert(label.range());
            }
            None => {}
        }
    }

    match orphan {
        Some(range) => Consumed::discard(text, range),
        None => Consumed::untouched(text),
    }
}

fn is_capital(patterns: &Patterns, value: &str) -> bool {
    patterns
        .capital
        .as_ref()
        .and_then(|re| re.find(value))
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

/// Província rotulada; sem rótulo, qualquer sinônimo isolado da capital.
/// Sinônimos da capital são sempre gravados com o nome oficial.
pub fn take_province(patterns: &Patterns, text: &str) -> Consumed {
    let mut step = take_labeled(patterns, patterns.province.as_ref(), text);
    if step.found() {
        if is_capital(patterns, &step.value) {
            step.value = patterns.locale.capital_name.to_string();
        }
        return step;
    }

    let Some(capital) = &patterns.capital else {
        return step;
    };
    let found = capital
        .find_iter(&step.rest)
        .find(|m| is_standalone(&step.rest, &m.range()) && starts_word(&step.rest, m.start()))
        .map(|m| m.range());
    match found {
        Some(range) => {
            let next = Consumed::claim(&step.rest, range, patterns.locale.capital_name);
            chain(step, next)
        }
        None => step,
    }
}

pub fn take_district(patterns: &Patterns, text: &str) -> Consumed {
    take_either_side(patterns, patterns.district_suffix.as_ref(), patterns.district.as_ref(), text)
}

pub fn take_subdistrict(patterns: &Patterns, text: &str) -> Consumed {
    take_either_side(patterns, patterns.subdistrict_suffix.as_ref(), patterns.subdistrict.as_ref(), text)
}

/// "ถนนสุขุมวิท" / "Road Silom"; em inglês também "Silom Road".
pub fn take_road(patterns: &Patterns, text: &str) -> Consumed {
    take_either_side(patterns, patterns.road_suffix.as_ref(), patterns.road.as_ref(), text)
}

/// Tenta primeiro a forma pós-fixada ("Khlong Toei District"), depois a rotulada.
fn take_either_side(patterns: &Patterns, suffix: Option<&Regex>, rule: Option<&LabeledRule>, text: &str) -> Consumed {
    match take_suffixed(patterns, suffix, text) {
        Some((range, value)) => Consumed::claim(text, range, value),
        None => take_labeled(patterns, rule, text),
    }
}

/// Lê até [`MAX_SUFFIXED_WORDS`] palavras à esquerda do rótulo, dentro do
/// mesmo trecho (vírgula, ponto e vírgula, parênteses e quebra de linha
/// encerram o trecho). Para em outro rótulo ou num número que não seja a
/// última palavra ("Rama 4 Road" fica com o 4, "99/1 Silom Rd" não).
fn take_suffixed(patterns: &Patterns, suffix: Option<&Regex>, text: &str) -> Option<(Range<usize>, String)> {
    let suffix = suffix?;
    for label in suffix.find_iter(text) {
        let head = &text[..label.start()];
        if !starts_word(text, label.start()) || !head.ends_with(char::is_whitespace) {
            continue;
        }
        let segment = head.rfind(SEGMENT_BREAKS).map_or(0, |i| i + 1);
        let words: Vec<regex::Match> = patterns.word.find_iter(&head[segment..]).collect();

        let mut first = None;
        for (taken, word) in words.iter().rev().enumerate() {
            let numeric = word.as_str().starts_with(|c: char| c.is_ascii_digit());
            if taken == MAX_SUFFIXED_WORDS || (numeric && taken > 0) || starts_with_label(patterns, word.as_str()) {
                break;
            }
            first = Some(segment + word.start());
        }
        let Some(first) = first else {
            continue;
        };
        let value = tidy_value(&collapse_whitespace(&text[first..label.start()]));
        if value.chars().any(char::is_alphabetic) {
            return Some((first..label.end(), value));
        }
    }
    None
}

pub fn take_lane(patterns: &Patterns, text: &str) -> Consumed {
    take_labeled(patterns, patterns.lane.as_ref(), text)
}

pub fn take_villageno(patterns: &Patterns, text: &str) -> Consumed {
    take_labeled(patterns, patterns.villageno.as_ref(), text)
}

/// "เลขที่ 123/45", "No. 7" ou o primeiro número que sobrou. O rótulo não
/// entra no valor e espaços em volta da barra são removidos.
pub fn take_house_number(patterns: &Patterns, text: &str) -> Consumed {
    let mut step = take_labeled(patterns, patterns.house.as_ref(), text);
    if step.found() {
        step.value = compact(&step.value);
        return step;
    }

    let found = patterns.house_unlabeled.find(&step.rest).map(|m| (m.range(), compact(m.as_str())));
    match found {
        Some((range, value)) => {
            let next = Consumed::claim(&step.rest, range, value);
            chain(step, next)
        }
        None => step,
    }
}

fn compact(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// O que sobrou vira `village`, sem o rótulo "อาคาร"/"Building"/"หมู่บ้าน".
pub fn take_remainder(patterns: &Patterns, text: &str) -> Consumed {
    let tidy = tidy_remainder(text);
    let mut rest = tidy.as_str();
    if let Some(m) = patterns.building_prefix.as_ref().and_then(|re| re.find(rest)) {
        rest = rest[m.end()..].trim();
    }
    if !rest.chars().any(char::is_alphabetic) {
        return Consumed::untouched(text);
    }
    Consumed {
        value: rest.to_string(),
        claimed: vec![tidy.clone()],
        rest: String::new(),
    }
}

fn tidy_remainder(text: &str) -> String {
    let spaced: String = text
        .chars()
        .map(|c| if matches!(c, ',' | ';' | '(' | ')' | '[' | ']') { ' ' } else { c })
        .collect();
    collapse_whitespace(&spaced)
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '.' | ':' | '/'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_thai_address() {
        let c = extract_address_components(
            "123/45 หมู่ 6 ซอยสุขใจ ถนนสุขุมวิท ตำบลบางนา อำเภอบางนา จังหวัดกรุงเทพมหานคร",
        );
        assert_eq!(c.number, "123/45");
        assert_eq!(c.villageno, "6");
        assert_eq!(c.lane, "สุขใจ");
        assert_eq!(c.road, "สุขุมวิท");
        assert_eq!(c.subdistrict, "บางนา");
        assert_eq!(c.district, "บางนา");
        assert_eq!(c.province, "กรุงเทพมหานคร");
        assert_eq!(c.village, "");
    }

    #[test]
    fn test_abbreviated_labels() {
        let c = extract_address_components("88/8 ม.2 ต.บางพูด อ.ปากเกร็ด จ.นนทบุรี");
        assert_eq!(c.number, "88/8");
        assert_eq!(c.villageno, "2");
        assert_eq!(c.subdistrict, "บางพูด");
        assert_eq!(c.district, "ปากเกร็ด");
        assert_eq!(c.province, "นนทบุรี");
    }

    #[test]
    fn test_capital_synonyms_normalize() {
        for text in ["เขตบางรัก กทม.", "เขตบางรัก กรุงเทพฯ", "Silom Rd, Bangkok", "จังหวัดกรุงเทพ"] {
            let c = extract_address_components(text);
            assert_eq!(c.province, "กรุงเทพมหานคร", "entrada: {text}");
        }
    }

    #[test]
    fn test_capital_inside_road_name_is_not_province() {
        let c = extract_address_components("ถนนกรุงเทพกรีฑา");
        assert_eq!(c.province, "");
        assert_eq!(c.road, "กรุงเทพกรีฑา");
    }

    #[test]
    fn test_label_followed_by_label_is_dropped() {
        let c = extract_address_components("ถนน ซอยร่วมฤดี");
        assert_eq!(c.road, "");
        assert_eq!(c.lane, "ร่วมฤดี");
        assert_eq!(c.village, "");
    }

    #[test]
    fn test_dangling_label_does_not_leak() {
        let c = extract_address_components("123 ถนน");
        assert_eq!(c.number, "123");
        assert_eq!(c.road, "");
        assert_eq!(c.village, "");
    }

    #[test]
    fn test_village_remainder_strips_label() {
        let c = extract_address_components("หมู่บ้านสุขใจ หมู่ 4");
        assert_eq!(c.villageno, "4");
        assert_eq!(c.village, "สุขใจ");

        let c = extract_address_components("99 อาคารสาทรซิตี้ ถนนสาทร");
        assert_eq!(c.number, "99");
        assert_eq!(c.village, "สาทรซิตี้");
    }

    #[test]
    fn test_lane_keeps_numeric_sub_token() {
        let c = extract_address_components("ซอยสุขุมวิท 101 ถนนสุขุมวิท");
        assert_eq!(c.road, "สุขุมวิท");
        assert_eq!(c.lane, "สุขุมวิท 101");
    }

    #[test]
    fn test_english_address() {
        let c = extract_address_components("99/1 Moo 3, Soi 5, Sukhumvit Rd., Bang Na");
        assert_eq!(c.number, "99/1");
        assert_eq!(c.villageno, "3");
        assert_eq!(c.lane, "5");
        assert_eq!(c.road, "Sukhumvit");
    }

    #[test]
    fn test_english_suffix_forms() {
        let c = extract_address_components("Khlong Toei District, Bangkok");
        assert_eq!(c.district, "Khlong Toei");
        assert_eq!(c.province, "กรุงเทพมหานคร");
        assert_eq!(c.village, "");

        let c = extract_address_components("Khlong Tan Sub-district, Khlong Toei District");
        assert_eq!(c.subdistrict, "Khlong Tan");
        assert_eq!(c.district, "Khlong Toei");
    }

    #[test]
    fn test_suffixed_road_skips_house_number_and_other_labels() {
        assert_eq!(extract_address_components("99/1 Silom Rd").road, "Silom");
        assert_eq!(extract_address_components("12 Rama 4 Road").road, "Rama 4");
        let c = extract_address_components("Soi 5 Sukhumvit Road");
        assert_eq!(c.road, "Sukhumvit");
        assert_eq!(c.lane, "5");
    }

    #[test]
    fn test_romanized_prefix_labels_still_work() {
        let c = extract_address_components("Tambon Bangphut Amphoe Pakkret");
        assert_eq!(c.subdistrict, "Bangphut");
        assert_eq!(c.district, "Pakkret");
    }

    #[test]
    fn test_lane_does_not_swallow_house_number() {
        let c = extract_address_components("เลขที่ 9 ซอยสุขใจ 12/3 ถนนสุขุมวิท");
        assert_eq!(c.lane, "สุขใจ");
        assert_eq!(c.road, "สุขุมวิท");
    }

    #[test]
    fn test_house_label_is_not_kept() {
        let c = extract_address_components("เลขที่ 12 / 3 ถนนพระราม 4");
        assert_eq!(c.number, "12/3");
        assert_eq!(c.road, "พระราม");
    }

    #[test]
    fn test_only_numbers_and_punctuation_is_not_a_village() {
        let c = extract_address_components("12, 34 - 56");
        assert_eq!(c.number, "12");
        assert_eq!(c.village, "");
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(extract_address_components(""), AddressComponents::default());
    }
}
