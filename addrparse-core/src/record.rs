//! # Registros de Saída
//!
//! [`ParsedAddress`] é o único produto do parser: um registro plano onde
//! **todos** os campos existem sempre, vazios quando nada foi encontrado.
//! [`GlobalTokens`] e [`AddressComponents`] são os resultados parciais das
//! duas metades do pipeline, fundidos no final.

use serde::{Deserialize, Serialize};

/// Identifica um campo do registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Phone,
    Email,
    Line,
    #[serde(rename = "taxid")]
    TaxId,
    Branch,
    Maps,
    Number,
    #[serde(rename = "villageno")]
    VillageNo,
    Village,
    Lane,
    Road,
    Subdistrict,
    District,
    Province,
    Zipcode,
}

impl Field {
    /// Ordem de serialização de [`ParsedAddress`].
    pub const ALL: [Field; 16] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Line,
        Field::TaxId,
        Field::Branch,
        Field::Maps,
        Field::Number,
        Field::VillageNo,
        Field::Village,
        Field::Lane,
        Field::Road,
        Field::Subdistrict,
        Field::District,
        Field::Province,
        Field::Zipcode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Line => "line",
            Field::TaxId => "taxid",
            Field::Branch => "branch",
            Field::Maps => "maps",
            Field::Number => "number",
            Field::VillageNo => "villageno",
            Field::Village => "village",
            Field::Lane => "lane",
            Field::Road => "road",
            Field::Subdistrict => "subdistrict",
            Field::District => "district",
            Field::Province => "province",
            Field::Zipcode => "zipcode",
        }
    }
}

/// Tokens inequívocos encontrados em qualquer lugar do texto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalTokens {
    pub taxid: String,
    pub phone: String,
    pub email: String,
    pub maps: String,
    pub line: String,
    pub branch: String,
    pub zipcode: String,
}

impl GlobalTokens {
    pub(crate) fn set(&mut self, field: Field, value: String) {
        match field {
            Field::TaxId => self.taxid = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::Maps => self.maps = value,
            Field::Line => self.line = value,
            Field::Branch => self.branch = value,
            Field::Zipcode => self.zipcode = value,
            _ => {}
        }
    }

    pub fn values(&self) -> [&str; 7] {
        [
            &self.taxid,
            &self.phone,
            &self.email,
            &self.maps,
            &self.line,
            &self.branch,
            &self.zipcode,
        ]
    }
}

/// Componentes administrativos extraídos do trecho de endereço.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub province: String,
    pub district: String,
    pub subdistrict: String,
    pub road: String,
    pub lane: String,
    pub villageno: String,
    pub number: String,
    pub village: String,
}

impl AddressComponents {
    pub(crate) fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Province => self.province = value,
            Field::District => self.district = value,
            Field::Subdistrict => self.subdistrict = value,
            Field::Road => self.road = value,
            Field::Lane => self.lane = value,
            Field::VillageNo => self.villageno = value,
            Field::Number => self.number = value,
            Field::Village => self.village = value,
            _ => {}
        }
    }
}

/// Registro final devolvido por [`crate::parse_universal_address`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedAddress {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub line: String,
    pub taxid: String,
    pub branch: String,
    pub maps: String,
    pub number: String,
    pub villageno: String,
    pub village: String,
    pub lane: String,
    pub road: String,
    pub subdistrict: String,
    pub district: String,
    pub province: String,
    pub zipcode: String,
}

impl ParsedAddress {
    pub fn assemble(name: String, tokens: GlobalTokens, components: AddressComponents) -> Self {
        Self {
            name,
            phone: tokens.phone,
            email: tokens.email,
            line: tokens.line,
            taxid: tokens.taxid,
            branch: tokens.branch,
            maps: tokens.maps,
            number: components.number,
            villageno: components.villageno,
            village: components.village,
            lane: components.lane,
            road: components.road,
            subdistrict: components.subdistrict,
            district: components.district,
            province: components.province,
            zipcode: tokens.zipcode,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Line => &self.line,
            Field::TaxId => &self.taxid,
            Field::Branch => &self.branch,
            Field::Maps => &self.maps,
            Field::Number => &self.number,
            Field::VillageNo => &self.villageno,
            Field::Village => &self.village,
            Field::Lane => &self.lane,
            Field::Road => &self.road,
            Field::Subdistrict => &self.subdistrict,
            Field::District => &self.district,
            Field::Province => &self.province,
            Field::Zipcode => &self.zipcode,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Line => &mut self.line,
            Field::TaxId => &mut self.taxid,
            Field::Branch => &mut self.branch,
            Field::Maps => &mut self.maps,
            Field::Number => &mut self.number,
            Field::VillageNo => &mut self.villageno,
            Field::Village => &mut self.village,
            Field::Lane => &mut self.lane,
            Field::Road => &mut self.road,
            Field::Subdistrict => &mut self.subdistrict,
            Field::District => &mut self.district,
            Field::Province => &mut self.province,
            Field::Zipcode => &mut self.zipcode,
        }
    }

    /// Pares `(campo, valor)` na ordem de [`Field::ALL`].
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn filled_count(&self) -> usize {
        self.fields().filter(|(_, v)| !v.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Copia para `target` apenas os campos não vazios, preservando o resto.
    ///
    /// É a convenção do formulário que chama o parser: o usuário pode já ter
    /// digitado parte dos dados, e um campo não encontrado não deve apagá-los.
    pub fn merge_into(&self, target: &mut ParsedAddress) {
        for (field, value) in self.fields() {
            if !value.is_empty() {
                *target.slot(field) = value.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serializes_every_field() {
        let json = serde_json::to_value(ParsedAddress::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 16);
        for field in Field::ALL {
            assert_eq!(obj[field.as_str()], "");
        }
    }

    #[test]
    fn test_field_serde_names_match_as_str() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let parsed: ParsedAddress = serde_json::from_str(r#"{"phone":"0812345678"}"#).unwrap();
        assert_eq!(parsed.phone, "0812345678");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.filled_count(), 1);
    }

    #[test]
    fn test_merge_into_only_overwrites_non_empty() {
        let mut existing = ParsedAddress {
            name: "ลูกค้าเดิม".into(),
            road: "พหลโยธิน".into(),
            ..Default::default()
        };
        let incoming = ParsedAddress {
            phone: "021234567".into(),
            road: "สุขุมวิท".into(),
            ..Default::default()
        };
        incoming.merge_into(&mut existing);
        assert_eq!(existing.name, "ลูกค้าเดิม");
        assert_eq!(existing.road, "สุขุมวิท");
        assert_eq!(existing.phone, "021234567");
    }

    #[test]
    fn test_assemble_routes_fields() {
        let tokens = GlobalTokens { zipcode: "10260".into(), ..Default::default() };
        let components = AddressComponents { road: "สุขุมวิท".into(), ..Default::default() };
        let record = ParsedAddress::assemble("x".into(), tokens, components);
        assert_eq!(record.zipcode, "10260");
        assert_eq!(record.road, "สุขุมวิท");
        assert_eq!(record.get(Field::Name), "x");
    }
}
