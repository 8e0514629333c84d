//! # Tabelas Regionais — Rótulos, Sinônimos e Marcadores
//!
//! Todo o conhecimento específico de idioma/país fica aqui, separado da ordem
//! de extração do pipeline. O pipeline só enxerga um [`Locale`]: para suportar
//! outro país basta montar um novo `Locale` com as próprias tabelas.
//!
//! ## Convenção das tabelas
//!
//! - **native**: rótulos na escrita local (tailandês). Comparados literalmente,
//!   sem fronteira de palavra, pois o tailandês não separa palavras por espaço
//!   (ex: "ถนนสุขุมวิท" = rótulo "ถนน" + valor "สุขุมวิท").
//! - **latin**: rótulos em alfabeto latino. Comparados sem diferenciar
//!   maiúsculas e exigindo início e fim de palavra ("district" não casa dentro
//!   de "Sub-district"). Espaços dentro do rótulo aceitam qualquer espaçamento.

/// Um conjunto de sinônimos para o mesmo rótulo.
#[derive(Debug, Clone, Copy)]
pub struct LabelSet {
    pub native: &'static [&'static str],
    pub latin: &'static [&'static str],
}

impl LabelSet {
    pub const EMPTY: LabelSet = LabelSet { native: &[], latin: &[] };

    pub fn is_empty(&self) -> bool {
        self.native.is_empty() && self.latin.is_empty()
    }

    /// Todos os rótulos (native + latin), na ordem das tabelas.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.native.iter().chain(self.latin.iter()).copied()
    }
}

/// Tabelas completas de uma localidade.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    pub code: &'static str,

    // === Tokens globais ===
    pub taxid_labels: LabelSet,
    pub phone_labels: LabelSet,
    /// Prefixo internacional que equivale ao `0` nacional (ex: "+66").
    pub phone_country_prefix: &'static str,
    pub email_labels: LabelSet,
    pub chat_labels: LabelSet,
    /// Valores que, se capturados como handle, são na verdade outro rótulo.
    pub rejected_handles: &'static [&'static str],
    pub head_office_labels: LabelSet,
    /// Valor gravado em `branch` quando o texto indica a matriz.
    pub head_office_value: &'static str,
    pub branch_labels: LabelSet,

    // === Separação nome/endereço ===
    pub entity_open: &'static [&'static str],
    pub entity_close: &'static [&'static str],
    pub entity_close_suffix: &'static [&'static str],
    /// Fragmentos regex (já escapados) que terminam uma razão social latina.
    pub latin_entity_close: &'static [&'static str],
    pub house_labels: LabelSet,

    // === Componentes do endereço ===
    pub province_labels: LabelSet,
    pub capital_synonyms: LabelSet,
    pub capital_name: &'static str,
    pub district_labels: LabelSet,
    pub subdistrict_labels: LabelSet,
    pub road_labels: LabelSet,
    pub lane_labels: LabelSet,
    pub villageno_labels: LabelSet,
    pub building_labels: LabelSet,
    /// Rótulos latinos de rua/distrito que também aparecem depois do nome
    /// ("Silom Road", "Khlong Toei District").
    pub suffix_labels: &'static [&'static str],

    // === Nome ===
    pub name_labels: LabelSet,
}

/// Tailândia (tailandês + inglês).
pub const THAI: Locale = Locale {
    code: "th",

    taxid_labels: LabelSet {
        native: &["เลขประจำตัวผู้เสียภาษีอากร", "เลขประจำตัวผู้เสียภาษี", "เลขผู้เสียภาษี", "เลขภาษี"],
        latin: &["tax id", "tax no", "taxid", "tax"],
    },
    phone_labels: LabelSet {
        native: &["โทรศัพท์", "มือถือ", "โทร.", "โทร", "เบอร์โทร", "เบอร์"],
        latin: &["telephone", "mobile", "phone", "tel", "mob", "call"],
    },
    phone_country_prefix: "+66",
    email_labels: LabelSet {
        native: &["อีเมล์", "อีเมล"],
        latin: &["e-mail", "email", "mail"],
    },
    chat_labels: LabelSet {
        native: &["ไอดีไลน์", "ไลน์ไอดี", "ไลน์", "ไอดี"],
        latin: &["line id", "lineid", "line", "id"],
    },
    rejected_handles: &["id", "line", "lineid", "tel", "phone", "email", "mail"],
    head_office_labels: LabelSet {
        native: &["สำนักงานใหญ่", "สนญ."],
        latin: &["head office", "headquarters", "headquarter"],
    },
    head_office_value: "สำนักงานใหญ่",
    branch_labels: LabelSet {
        native: &["สาขาที่", "สาขา"],
        latin: &["branch no", "branch"],
    },

    entity_open: &["บริษัท", "ห้างหุ้นส่วนจำกัด", "ห้างหุ้นส่วนสามัญ", "ห้างหุ้นส่วน"],
    entity_close: &["จำกัด"],
    entity_close_suffix: &["(มหาชน)"],
    latin_entity_close: &[r"co\s*\.?\s*,?\s*ltd\b\.?", r"limited\b"],
    house_labels: LabelSet {
        native: &["บ้านเลขที่", "เลขที่"],
        latin: &["no"],
    },

    province_labels: LabelSet {
        native: &["จังหวัด", "จ."],
        latin: &["province", "changwat"],
    },
    capital_synonyms: LabelSet {
        native: &["กรุงเทพมหานคร", "กรุงเทพฯ", "กรุงเทพ", "กทม.", "กทม"],
        latin: &["bangkok", "bkk"],
    },
    capital_name: "กรุงเทพมหานคร",
    district_labels: LabelSet {
        native: &["อำเภอ", "อ.", "เขต"],
        latin: &["district", "amphoe", "amphur", "khet"],
    },
    subdistrict_labels: LabelSet {
        native: &["ตำบล", "ต.", "แขวง"],
        latin: &["sub-district", "subdistrict", "tambon", "khwaeng", "kwang"],
    },
    road_labels: LabelSet {
        native: &["ถนน", "ถ."],
        latin: &["road", "rd"],
    },
    lane_labels: LabelSet {
        native: &["ซอย", "ซ."],
        latin: &["soi"],
    },
    villageno_labels: LabelSet {
        native: &["หมู่ที่", "หมู่", "ม."],
        latin: &["moo"],
    },
    building_labels: LabelSet {
        native: &["หมู่บ้าน", "อาคาร", "ตึก"],
        latin: &["building", "village", "bldg"],
    },
    suffix_labels: &["road", "rd", "district", "sub-district", "subdistrict"],

    name_labels: LabelSet {
        native: &["ชื่อ-นามสกุล", "ชื่อลูกค้า", "ชื่อบริษัท", "ชื่อ"],
        latin: &["full name", "company", "customer", "name"],
    },
};

impl Default for Locale {
    fn default() -> Self {
        THAI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_name_is_a_synonym() {
        assert!(THAI.capital_synonyms.iter().any(|s| s == THAI.capital_name));
    }

    #[test]
    fn test_rejected_handles_are_lowercase() {
        for word in THAI.rejected_handles {
            assert_eq!(*word, word.to_lowercase());
        }
    }

    #[test]
    fn test_label_set_iter_chains_both_scripts() {
        let labels: Vec<&str> = THAI.road_labels.iter().collect();
        assert_eq!(labels, vec!["ถนน", "ถ.", "road", "rd"]);
        assert!(LabelSet::EMPTY.is_empty());
    }
}
