//! # Consumo de Texto — o acumulador do pipeline
//!
//! Cada etapa de extração é uma função pura `(&str) -> Consumed`: recebe o
//! texto de trabalho e devolve o valor extraído junto com o texto restante,
//! já sem os trechos reivindicados. As etapas seguintes só enxergam `rest`,
//! então nenhum caractere é reivindicado por dois campos.

use std::ops::Range;

/// Resultado de uma etapa de extração.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumed {
    /// Valor extraído (vazio se a etapa não encontrou nada).
    pub value: String,
    /// Trechos literais removidos do texto de trabalho.
    pub claimed: Vec<String>,
    /// Texto que segue para a próxima etapa.
    pub rest: String,
}

impl Consumed {
    /// Nada encontrado: o texto passa intacto.
    pub fn untouched(text: &str) -> Self {
        Self {
            value: String::new(),
            claimed: Vec::new(),
            rest: text.to_string(),
        }
    }

    /// Reivindica `range` de `text` e grava `value` como resultado.
    pub fn claim(text: &str, range: Range<usize>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            claimed: vec![text[range.clone()].to_string()],
            rest: blank_out(text, range),
        }
    }

    /// Reivindica todos os trechos `ranges` (rótulo + valor de cada cópia) e
    /// depois qualquer ocorrência solta de `bare`, o valor sem rótulo.
    ///
    /// `ranges` vem em ordem crescente; trechos sobrepostos são ignorados.
    pub fn claim_everywhere(
        text: &str,
        ranges: &[Range<usize>],
        bare: &str,
        value: impl Into<String>,
    ) -> Self {
        let mut claimed = Vec::with_capacity(ranges.len() + 1);
        let mut rest = text.to_string();
        let mut floor = text.len();
        for range in ranges.iter().rev() {
            if range.end > floor || range.is_empty() {
                continue;
            }
            claimed.push(text[range.clone()].trim().to_string());
            rest = blank_out(&rest, range.clone());
            floor = range.start;
        }
        claimed.reverse();

        let bare = bare.trim();
        if !bare.is_empty() {
            rest = remove_occurrences(&rest, bare);
            if !claimed.iter().any(|span| span == bare) {
                claimed.push(bare.to_string());
            }
        }
        Self {
            value: value.into(),
            claimed,
            rest,
        }
    }

    /// Só remove o rótulo: o campo fica vazio, mas o rótulo não vaza adiante.
    pub fn discard(text: &str, range: Range<usize>) -> Self {
        Self::claim(text, range, String::new())
    }

    pub fn found(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Substitui `range` por um único espaço.
pub fn blank_out(text: &str, range: Range<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..range.start]);
    out.push(' ');
    out.push_str(&text[range.end..]);
    out
}

/// Remove todas as ocorrências de `span`. Trechos que começam/terminam com
/// dígito só são removidos quando não estão colados a outros dígitos.
pub fn remove_occurrences(text: &str, span: &str) -> String {
    if span.is_empty() {
        return text.to_string();
    }
    let leading_digit = span.starts_with(|c: char| c.is_ascii_digit());
    let trailing_digit = span.ends_with(|c: char| c.is_ascii_digit());

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, _) in text.match_indices(span) {
        if start < cursor {
            continue;
        }
        let end = start + span.len();
        let glued_before = leading_digit && prev_char(text, start).is_some_and(|c| c.is_ascii_digit());
        let glued_after = trailing_digit && next_char(text, end).is_some_and(|c| c.is_ascii_digit());
        if glued_before || glued_after {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push(' ');
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Junta espaços (inclusive quebras de linha) num único espaço e apara as pontas.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn prev_char(text: &str, idx: usize) -> Option<char> {
    text[..idx].chars().next_back()
}

pub fn next_char(text: &str, idx: usize) -> Option<char> {
    text[idx..].chars().next()
}

/// Letra, dígito ou qualquer caractere do bloco tailandês exceto `ฯ`
/// (sinais vocálicos e tonais tailandeses não são `alphanumeric`).
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || (('\u{0E00}'..='\u{0E7F}').contains(&c) && c != 'ฯ')
}

/// Verdadeiro se um rótulo latino começando em `start` inicia uma palavra.
/// Rótulos em escrita local não exigem fronteira.
pub fn starts_word(text: &str, start: usize) -> bool {
    let latin_label = next_char(text, start).is_some_and(|c| c.is_ascii_alphabetic());
    if !latin_label {
        return true;
    }
    match prev_char(text, start) {
        Some(c) => !is_word_char(c) && c != '-',
        None => true,
    }
}

/// Verdadeiro se o trecho `range` não está colado a outras letras dos dois lados.
pub fn is_standalone(text: &str, range: &Range<usize>) -> bool {
    let before = prev_char(text, range.start).is_some_and(is_word_char);
    let after = next_char(text, range.end).is_some_and(is_word_char);
    !before && !after
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_replaces_span_with_space() {
        let step = Consumed::claim("abc 123 def", 4..7, "123");
        assert_eq!(step.value, "123");
        assert_eq!(step.claimed, vec!["123"]);
        assert_eq!(step.rest, "abc   def");
    }

    #[test]
    fn test_remove_occurrences_respects_digit_boundaries() {
        assert_eq!(remove_occurrences("10260 x 10260", "10260"), "  x  ");
        assert_eq!(remove_occurrences("102601 x", "10260"), "102601 x");
        assert_eq!(remove_occurrences("a@b.co a@b.co", "a@b.co"), "   ");
    }

    #[test]
    fn test_claim_everywhere_drops_repeats() {
        let text = "สำนักงานใหญ่ abc สำนักงานใหญ่";
        let step = Consumed::claim_everywhere(text, &[0.."สำนักงานใหญ่".len()], "สำนักงานใหญ่", "HQ");
        assert!(!step.rest.contains("สำนักงานใหญ่"));
        assert!(step.rest.contains("abc"));
    }

    #[test]
    fn test_claim_everywhere_removes_bare_copies_of_labelled_span() {
        let text = "Tel: 0812345678 ร้าน Tel: 0812345678 (0812345678)";
        let ranges = [0..15, 29..44];
        let step = Consumed::claim_everywhere(text, &ranges, "0812345678", "0812345678");
        assert_eq!(collapse_whitespace(&step.rest), "ร้าน ( )");
        assert_eq!(step.claimed, vec!["Tel: 0812345678", "Tel: 0812345678", "0812345678"]);
    }

    #[test]
    fn test_starts_word_only_checks_latin_labels() {
        assert!(!starts_word("Sub-district", 4));
        assert!(!starts_word("Subdistrict", 3));
        assert!(starts_word("Bang Na district", 8));
        // rótulo tailandês colado à palavra anterior continua valendo
        let text = "ติดต่อโทร";
        assert!(starts_word(text, "ติดต่อ".len()));
    }

    #[test]
    fn test_is_standalone() {
        let text = "ถนนกรุงเทพกรีฑา";
        let start = "ถนน".len();
        assert!(!is_standalone(text, &(start..start + "กรุงเทพ".len())));
        let text = "x กรุงเทพฯ 10200";
        assert!(is_standalone(text, &(2..2 + "กรุงเทพฯ".len())));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }
}
