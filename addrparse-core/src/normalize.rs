//! Normalização da entrada colada pelo usuário.
//!
//! Remove caracteres invisíveis (zero-width, BOM, soft hyphen, controles),
//! converte dígitos tailandeses (๐–๙) em ASCII e junta espaços repetidos.
//! As quebras de linha são mantidas: o nome de fallback usa a primeira linha.

/// Caracteres sem largura que aparecem em textos copiados de chats e PDFs.
const INVISIBLE: &[char] = &[
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{200E}', '\u{200F}', '\u{2060}', '\u{FEFF}', '\u{00AD}',
];

pub fn normalize_input(text: &str) -> String {
    let cleaned: String = text
        .replace("\r\n", "\n")
        .chars()
        .filter_map(|c| match c {
            '\r' => Some('\n'),
            '\n' | '\t' => Some(c),
            c if INVISIBLE.contains(&c) => None,
            c if c.is_control() => None,
            c => Some(fold_digit(c)),
        })
        .collect();

    cleaned
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `๑๒๓` → `123`
fn fold_digit(c: char) -> char {
    match c {
        '๐'..='๙' => char::from(b'0' + (c as u32 - '๐' as u32) as u8),
        _ => c,
    }
}

/// Primeira linha não vazia do texto já normalizado.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
