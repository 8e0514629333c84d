//! # Extrator de Tokens Globais
//!
//! Varre o texto inteiro atrás de dados inequívocos, que não dependem de
//! posição: CPF tailandês (tax ID), telefone, e-mail, link de mapa, ID de
//! LINE, filial e CEP. Cada token encontrado é **removido** do texto antes da
//! próxima etapa, e a ordem é fixa:
//!
//! 1. Tax ID (13 dígitos seguidos)
//! 2. Telefone
//! 3. E-mail
//! 4. Link de mapa
//! 5. Handle de chat
//! 6. Filial / matriz
//! 7. CEP
//!
//! Assim os 13 dígitos do tax ID nunca viram telefone, e o e-mail some antes
//! que o `@` confunda a busca pelo handle.

use std::ops::Range;

use crate::consume::{collapse_whitespace, next_char, prev_char, starts_word, Consumed};
use crate::patterns::{self, Patterns};
use crate::record::{Field, GlobalTokens};

/// Uma etapa da extração de tokens.
pub type TokenStep = fn(&Patterns, &str) -> Consumed;

/// A ordem da extração é um dado, não um detalhe de implementação.
pub const TOKEN_ORDER: [(Field, TokenStep); 7] = [
    (Field::TaxId, take_tax_id),
    (Field::Phone, take_phone),
    (Field::Email, take_email),
    (Field::Maps, take_map_link),
    (Field::Line, take_chat_handle),
    (Field::Branch, take_branch),
    (Field::Zipcode, take_zipcode),
];

const TAXID_DIGITS: usize = 13;
const ZIPCODE_DIGITS: usize = 5;
const ZIPCODE_FLOOR: u32 = 10000;

/// Resultado completo da extração global.
#[derive(Debug, Clone, Default)]
pub struct TokenPass {
    pub tokens: GlobalTokens,
    /// Trechos literais removidos, na ordem em que foram reivindicados.
    pub claimed: Vec<String>,
    pub cleaned: String,
}

/// Extrai os tokens globais com a localidade padrão.
pub fn extract_global_tokens(text: &str) -> (GlobalTokens, String) {
    let pass = run_token_pass(&patterns::thai(), text, &mut |_, _| {});
    (pass.tokens, pass.cleaned)
}

/// Executa todas as etapas de [`TOKEN_ORDER`], avisando `on_token` a cada achado.
pub fn run_token_pass(
    patterns: &Patterns,
    text: &str,
    on_token: &mut dyn FnMut(Field, &str),
) -> TokenPass {
    let mut pass = TokenPass::default();
    let mut working = text.to_string();

    for (field, step) in TOKEN_ORDER {
        let consumed = step(patterns, &working);
        if consumed.found() {
            on_token(field, &consumed.value);
            pass.tokens.set(field, consumed.value);
        }
        pass.claimed.extend(consumed.claimed);
        working = consumed.rest;
    }

    pass.cleaned = collapse_whitespace(&working);
    pass
}

/// Primeira sequência de exatamente 13 dígitos. Um rótulo imediatamente
/// anterior ("Tax ID:", "เลขประจำตัวผู้เสียภาษี") é removido junto, em cada cópia.
pub fn take_tax_id(patterns: &Patterns, text: &str) -> Consumed {
    let mut runs = patterns
        .digit_run
        .find_iter(text)
        .filter(|m| m.as_str().len() == TAXID_DIGITS);
    let Some(first) = runs.next() else {
        return Consumed::untouched(text);
    };

    let mut ranges = vec![with_taxid_label(patterns, text, first.range())];
    ranges.extend(
        runs.filter(|m| m.as_str() == first.as_str())
            .map(|m| with_taxid_label(patterns, text, m.range())),
    );
    Consumed::claim_everywhere(text, &ranges, first.as_str(), first.as_str())
}

/// Estende `run` para trás sobre o rótulo de tax ID, se houver.
fn with_taxid_label(patterns: &Patterns, text: &str, run: Range<usize>) -> Range<usize> {
    let label = patterns
        .taxid_label_tail
        .as_ref()
        .and_then(|tail| tail.captures(&text[..run.start]))
        .and_then(|caps| caps.name("label"))
        .filter(|label| starts_word(text, label.start()));
    match label {
        Some(label) => label.start()..run.end,
        None => run,
    }
}

/// Telefone tailandês: `0` + 1–2 dígitos, depois 3 e 3–4 dígitos, com hífen
/// ou espaço opcionais. `+66` equivale ao `0` inicial.
///
/// Outras grafias do mesmo número ("081-234-5678" e "0812345678") também
/// saem do texto.
pub fn take_phone(patterns: &Patterns, text: &str) -> Consumed {
    let prefix = patterns.locale.phone_country_prefix;
    let mut found: Option<(String, &str)> = None;
    let mut ranges = Vec::new();

    for caps in patterns.phone.captures_iter(text) {
        let Some(number) = caps.name("value") else {
            continue;
        };
        let glued_before = prev_char(text, number.start()).is_some_and(|c| c.is_ascii_digit());
        let glued_after = next_char(text, number.end()).is_some_and(|c| c.is_ascii_digit());
        if glued_before || glued_after {
            continue;
        }

        let value = normalize_phone(number.as_str(), prefix);
        if let Some((first, _)) = &found {
            if *first != value {
                continue;
            }
        } else {
            found = Some((value, number.as_str()));
        }
        let start = match caps.name("label") {
            Some(label) if starts_word(text, label.start()) => label.start(),
            _ => number.start(),
        };
        ranges.push(start..number.end());
    }

    match found {
        Some((value, raw)) => Consumed::claim_everywhere(text, &ranges, raw, value),
        None => Consumed::untouched(text),
    }
}

/// Mantém só os dígitos; o prefixo do país vira `0`.
pub fn normalize_phone(raw: &str, country_prefix: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let country: String = country_prefix.chars().filter(|c| c.is_ascii_digit()).collect();
    if !country.is_empty() && raw.trim_start().starts_with('+') && digits.starts_with(&country) {
        format!("0{}", &digits[country.len()..])
    } else {
        digits
    }
}

pub fn take_email(patterns: &Patterns, text: &str) -> Consumed {
    let mut address: Option<&str> = None;
    let mut ranges = Vec::new();
    for caps in patterns.email.captures_iter(text) {
        let Some(value) = caps.name("value") else {
            continue;
        };
        match address {
            Some(first) if first != value.as_str() => continue,
            Some(_) => {}
            None => address = Some(value.as_str()),
        }
        let start = match caps.name("label") {
            Some(label) if starts_word(text, label.start()) => label.start(),
            _ => value.start(),
        };
        ranges.push(start..value.end());
    }
    match address {
        Some(address) => Consumed::claim_everywhere(text, &ranges, address, address),
        None => Consumed::untouched(text),
    }
}

pub fn take_map_link(patterns: &Patterns, text: &str) -> Consumed {
    match patterns.maps.find(text) {
        Some(m) => Consumed::claim_everywhere(text, &[m.range()], m.as_str(), m.as_str()),
        None => Consumed::untouched(text),
    }
}

/// Rótulo de chat + `:`/`-`/`@` + handle. Um handle que é ele próprio um
/// rótulo genérico ("id", "tel") é descartado e a busca continua.
pub fn take_chat_handle(patterns: &Patterns, text: &str) -> Consumed {
    let Some(chat) = &patterns.chat else {
        return Consumed::untouched(text);
    };
    let mut found: Option<&str> = None;
    let mut ranges = Vec::new();
    for caps in chat.captures_iter(text) {
        let (Some(label), Some(handle)) = (caps.name("label"), caps.name("value").or(caps.name("at")))
        else {
            continue;
        };
        if !starts_word(text, label.start()) {
            continue;
        }
        match found {
            Some(first) if first != handle.as_str() => continue,
            Some(_) => {}
            None => {
                let bare = handle.as_str().trim_start_matches('@').to_lowercase();
                let meaningful = bare.chars().any(|c| c.is_ascii_alphanumeric());
                if !meaningful || patterns.locale.rejected_handles.contains(&bare.as_str()) {
                    continue;
                }
                found = Some(handle.as_str());
            }
        }
        ranges.push(label.start()..handle.end());
    }
    match found {
        Some(handle) => Consumed::claim_everywhere(text, &ranges, handle, handle),
        None => Consumed::untouched(text),
    }
}

/// "สำนักงานใหญ่"/"Head Office" vira o sentinela da matriz; senão procura
/// "สาขา 00001" / "Branch 2".
pub fn take_branch(patterns: &Patterns, text: &str) -> Consumed {
    if let Some(head_office) = &patterns.head_office {
        let ranges: Vec<Range<usize>> = head_office
            .captures_iter(text)
            .filter(|caps| caps.name("label").is_some_and(|l| starts_word(text, l.start())))
            .filter_map(|caps| caps.get(0).map(|whole| whole.range()))
            .collect();
        if !ranges.is_empty() {
            return Consumed::claim_everywhere(text, &ranges, "", patterns.locale.head_office_value);
        }
    }

    let Some(branch) = &patterns.branch else {
        return Consumed::untouched(text);
    };
    for caps in branch.captures_iter(text) {
        let (Some(whole), Some(label), Some(code)) = (caps.get(0), caps.name("label"), caps.name("value"))
        else {
            continue;
        };
        if starts_word(text, label.start()) {
            return Consumed::claim(text, whole.range(), code.as_str());
        }
    }
    Consumed::untouched(text)
}

/// Entre as sequências de exatamente 5 dígitos, prefere a primeira acima de
/// 10000; se nenhuma passar, fica com a última.
pub fn take_zipcode(patterns: &Patterns, text: &str) -> Consumed {
    let candidates: Vec<regex::Match> = patterns
        .digit_run
        .find_iter(text)
        .filter(|m| m.as_str().len() == ZIPCODE_DIGITS)
        .collect();

    let preferred = candidates
        .iter()
        .find(|m| m.as_str().parse::<u32>().is_ok_and(|v| v > ZIPCODE_FLOOR))
        .or(candidates.last());

    match preferred {
        Some(m) => Consumed::claim_everywhere(text, &[m.range()], m.as_str(), m.as_str()),
        None => Consumed::untouched(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thai() -> std::sync::Arc<Patterns> {
        patterns::thai()
    }

    #[test]
    fn test_tax_id_requires_exactly_13_digits() {
        let p = thai();
        assert_eq!(take_tax_id(&p, "เลข 0105558123456 ok").value, "0105558123456");
        assert!(!take_tax_id(&p, "01055581234567").found());
        assert!(!take_tax_id(&p, "010555-8123456").found());
    }

    #[test]
    fn test_tax_id_removes_its_label() {
        let p = thai();
        let step = take_tax_id(&p, "บริษัท ก จำกัด Tax ID: 0105558123456");
        assert_eq!(step.value, "0105558123456");
        assert!(!step.rest.to_lowercase().contains("tax"));
        let step = take_tax_id(&p, "เลขประจำตัวผู้เสียภาษี 0105558123456");
        assert_eq!(step.rest.trim(), "");
    }

    #[test]
    fn test_phone_formats() {
        let p = thai();
        assert_eq!(take_phone(&p, "โทร 02-123-4567").value, "021234567");
        assert_eq!(take_phone(&p, "081 234 5678").value, "0812345678");
        assert_eq!(take_phone(&p, "Tel: 0812345678").value, "0812345678");
        assert_eq!(take_phone(&p, "+66 81 234 5678").value, "0812345678");
    }

    #[test]
    fn test_phone_label_is_claimed() {
        let p = thai();
        let step = take_phone(&p, "คุณเอ โทร. 081-234-5678 ค่ะ");
        assert_eq!(step.value, "0812345678");
        assert_eq!(collapse_whitespace(&step.rest), "คุณเอ ค่ะ");
    }

    #[test]
    fn test_phone_ignores_digits_inside_longer_runs() {
        let p = thai();
        assert!(!take_phone(&p, "ref 1208123456789").found());
        assert!(!take_phone(&p, "10260").found());
    }

    #[test]
    fn test_email_with_label() {
        let p = thai();
        let step = take_email(&p, "อีเมล: sales@shop.co.th.");
        assert_eq!(step.value, "sales@shop.co.th");
        assert!(!step.rest.contains("อีเมล"));
    }

    #[test]
    fn test_map_link() {
        let p = thai();
        let step = take_map_link(&p, "แผนที่ https://maps.app.goo.gl/AbC123 ครับ");
        assert_eq!(step.value, "https://maps.app.goo.gl/AbC123");
        assert!(!take_map_link(&p, "https://example.com/maps").found());
    }

    #[test]
    fn test_chat_handle_variants() {
        let p = thai();
        assert_eq!(take_chat_handle(&p, "Line: somchai.k").value, "somchai.k");
        assert_eq!(take_chat_handle(&p, "ไลน์ @shopmart").value, "@shopmart");
        assert_eq!(take_chat_handle(&p, "Line ID - my_id-01").value, "my_id-01");
    }

    #[test]
    fn test_chat_handle_rejects_generic_label_words() {
        let p = thai();
        assert!(!take_chat_handle(&p, "Line: id").found());
        // o primeiro casamento é um rótulo; o segundo é o handle de verdade
        assert_eq!(take_chat_handle(&p, "ID: tel Line: realname").value, "realname");
    }

    #[test]
    fn test_chat_label_needs_word_boundary() {
        let p = thai();
        assert!(!take_chat_handle(&p, "Said: hello").found());
    }

    #[test]
    fn test_branch_head_office_and_code() {
        let p = thai();
        let step = take_branch(&p, "บริษัท ก จำกัด (สำนักงานใหญ่)");
        assert_eq!(step.value, "สำนักงานใหญ่");
        assert!(!step.rest.contains('('));
        assert_eq!(take_branch(&p, "สาขาที่ 00002").value, "00002");
        assert_eq!(take_branch(&p, "Branch No. 3").value, "3");
        assert_eq!(take_branch(&p, "HEAD OFFICE").value, "สำนักงานใหญ่");
    }

    #[test]
    fn test_zipcode_prefers_value_above_floor() {
        let p = thai();
        assert_eq!(take_zipcode(&p, "00123 x 10260").value, "10260");
        assert_eq!(take_zipcode(&p, "10260 x 00123").value, "10260");
        assert_eq!(take_zipcode(&p, "00123 x 09999").value, "09999");
        assert!(!take_zipcode(&p, "123456").found());
    }

    #[test]
    fn test_order_keeps_tax_id_out_of_phone() {
        let (tokens, cleaned) = extract_global_tokens("0812345678901 โทร 081-234-5678");
        assert_eq!(tokens.taxid, "0812345678901");
        assert_eq!(tokens.phone, "0812345678");
        assert_eq!(cleaned, "");
    }

    #[test]
    fn test_cleaned_text_never_contains_token_values() {
        let text = "ร้านดี Tel 02-111-2222 mail: a.b@c.com Line: shop_1 สาขา 00001 https://goo.gl/maps/x 10110 0994000123456";
        let (tokens, cleaned) = extract_global_tokens(text);
        for value in tokens.values() {
            if !value.is_empty() {
                assert!(!cleaned.contains(value), "{value} sobrou em {cleaned}");
            }
        }
        assert_eq!(cleaned, "ร้านดี");
        assert_eq!(tokens.branch, "00001");
        assert_eq!(tokens.zipcode, "10110");
    }

    #[test]
    fn test_repeated_labelled_tokens_are_removed_everywhere() {
        let (tokens, cleaned) =
            extract_global_tokens("Tax ID: 0105558123456 ร้านดี เลขผู้เสียภาษี 0105558123456");
        assert_eq!(tokens.taxid, "0105558123456");
        assert_eq!(cleaned, "ร้านดี");

        let (tokens, cleaned) = extract_global_tokens("Tel 0812345678 ร้านดี โทร 081-234-5678");
        assert_eq!(tokens.phone, "0812345678");
        assert_eq!(cleaned, "ร้านดี");

        let (tokens, cleaned) = extract_global_tokens("Email: a@b.com ร้านดี a@b.com");
        assert_eq!(tokens.email, "a@b.com");
        assert_eq!(cleaned, "ร้านดี");

        let (tokens, cleaned) = extract_global_tokens("Line: shop_1 ร้านดี ไลน์: shop_1");
        assert_eq!(tokens.line, "shop_1");
        assert_eq!(cleaned, "ร้านดี");
    }

    #[test]
    fn test_bare_copy_of_labelled_tax_id_is_removed() {
        let p = thai();
        let step = take_tax_id(&p, "Tax ID: 0105558123456 ร้านดี 0105558123456");
        assert_eq!(collapse_whitespace(&step.rest), "ร้านดี");
        assert_eq!(step.claimed, vec!["Tax ID: 0105558123456", "0105558123456"]);
    }

    #[test]
    fn test_other_phone_numbers_stay_in_text() {
        let p = thai();
        let step = take_phone(&p, "Tel 0812345678 Fax 021234567");
        assert_eq!(step.value, "0812345678");
        assert!(step.rest.contains("021234567"));
    }

    #[test]
    fn test_branch_code_next_to_zipcode() {
        let (tokens, cleaned) = extract_global_tokens("ร้านดี สาขา 00001 10110");
        assert_eq!(tokens.branch, "00001");
        assert_eq!(tokens.zipcode, "10110");
        assert_eq!(tokens.phone, "");
        assert_eq!(cleaned, "ร้านดี");
    }

    #[test]
    fn test_empty_input() {
        let (tokens, cleaned) = extract_global_tokens("");
        assert_eq!(tokens, GlobalTokens::default());
        assert_eq!(cleaned, "");
    }
}
