use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

pub const EMPLOYEE_TABLE: &str = "funcionarios";

/// The closed set of attribute columns of `funcionarios`.
///
/// This is the allow-list: the only identifiers that ever get interpolated
/// into SQL text. Anything a caller sends is parsed into a `Column` first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    Funcionario,
    Matricula,
    Admissao,
    Cpf,
    Rg,
    Nascimento,
    Cargo,
    Perfil,
    InternoVolante,
    Localidade,
    Fila,
    Field,
    EmailCorporativo,
    CelCorporativo,
    CelPessoal,
    Municipio,
    Bairro,
    Endereco,
    Veiculo,
    Placa,
    Supervisor,
}

/// Spreadsheet header -> column, as found in the headcount workbook.
pub const SPREADSHEET_HEADERS: [(&str, Column); 21] = [
    ("FUNCIONÁRIO(A):", Column::Funcionario),
    ("Matricula", Column::Matricula),
    ("Admissão", Column::Admissao),
    ("CPF", Column::Cpf),
    ("RG", Column::Rg),
    ("Nascimento", Column::Nascimento),
    ("CARGO:", Column::Cargo),
    ("PERFIL", Column::Perfil),
    ("Interno/Volante", Column::InternoVolante),
    ("LOCALIDADE", Column::Localidade),
    ("FILA", Column::Fila),
    ("FIELD", Column::Field),
    ("Email Corporativo", Column::EmailCorporativo),
    ("Cel Corporativo", Column::CelCorporativo),
    ("Cel Pessoal", Column::CelPessoal),
    ("Municipio de Moradia", Column::Municipio),
    ("Bairro", Column::Bairro),
    ("Endereço", Column::Endereco),
    ("Veiculo", Column::Veiculo),
    ("Placa", Column::Placa),
    ("Supervisor", Column::Supervisor),
];

static HEADER_LOOKUP: Lazy<HashMap<&'static str, Column>> =
    Lazy::new(|| SPREADSHEET_HEADERS.iter().copied().collect());

/// `id, funcionario, ..., supervisor` in schema order.
pub static EMPLOYEE_SELECT_COLUMNS: Lazy<String> = Lazy::new(|| {
    std::iter::once("id")
        .chain(Column::iter().map(Column::name))
        .collect::<Vec<_>>()
        .join(", ")
});

impl Column {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Label shown in the table head and the edit form.
    pub fn label(self) -> &'static str {
        match self {
            Column::Funcionario => "Funcionário(a)",
            Column::Matricula => "Matrícula",
            Column::Admissao => "Admissão",
            Column::Cpf => "CPF",
            Column::Rg => "RG",
            Column::Nascimento => "Nascimento",
            Column::Cargo => "Cargo",
            Column::Perfil => "Perfil",
            Column::InternoVolante => "Interno/Volante",
            Column::Localidade => "Localidade",
            Column::Fila => "Fila",
            Column::Field => "Field",
            Column::EmailCorporativo => "Email Corporativo",
            Column::CelCorporativo => "Cel Corporativo",
            Column::CelPessoal => "Cel Pessoal",
            Column::Municipio => "Município de Moradia",
            Column::Bairro => "Bairro",
            Column::Endereco => "Endereço",
            Column::Veiculo => "Veículo",
            Column::Placa => "Placa",
            Column::Supervisor => "Supervisor",
        }
    }
}

/// Resolves a spreadsheet header to a column.
///
/// Accepts the external headcount header or the internal column name, so a
/// file produced by the exporter can be imported back.
pub fn column_for_header(header: &str) -> Option<Column> {
    let header = header.trim();
    HEADER_LOOKUP
        .get(header)
        .copied()
        .or_else(|| Column::from_str(header).ok())
}
