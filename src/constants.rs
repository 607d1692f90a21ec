/// Column headers recognized in order tabs (after trimming and upper-casing).
pub mod columns {
    /// Order identifier column.
    pub const PEDIDO: &str = "PEDIDO";
    /// Status text column.
    pub const STATUS: &str = "STATUS";
    /// Payment forecast date column.
    pub const DATA: &str = "DATA";
    /// Amount column (BRL, locale formatted).
    pub const VALOR: &str = "VALOR";
    /// Requesting unit column.
    pub const UNIDADE: &str = "UNIDADE";
    /// Vehicle / usage column.
    pub const CARRO: &str = "CARRO | UTILIZAÇÃO";
    /// Supplier column.
    pub const FORNECEDOR: &str = "FORNECEDOR";
    /// Evaluating area column.
    pub const AVALIACAO: &str = "AVALIAÇÃO";
    /// Free-form notes column.
    pub const OBSERVACOES: &str = "OBSERVAÇÕES";
    /// Columns a tab must carry to be loaded at all.
    pub const REQUIRED: [&str; 3] = [PEDIDO, DATA, STATUS];
    /// Column layout for a new registration when the tab has no header row.
    pub const REGISTER_LAYOUT: [&str; 9] = [
        DATA, UNIDADE, CARRO, PEDIDO, VALOR, FORNECEDOR, STATUS, AVALIACAO, OBSERVACOES,
    ];
}

/// Tab names and loading defaults.
pub mod tabs {
    /// High-priority purchase tab.
    pub const ALTA: &str = "ALTA";
    /// Emergency purchase tab.
    pub const EMERGENCIAL: &str = "EMERGENCIAL";
    /// Row index holding column headers (row 0 is a sheet title).
    pub const DEFAULT_HEADER_ROW: usize = 1;
    /// Daily spend limit for `ALTA`, in BRL.
    pub const LIMITE_ALTA_DIARIO: f64 = 180_000.00;
    /// Daily spend limit for `EMERGENCIAL`, in BRL.
    pub const LIMITE_EMERG_DIARIO: f64 = 15_000.00;
    /// America/Sao_Paulo offset from UTC, in minutes.
    pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;
}

/// Search-history labels and sentinels.
pub mod history {
    /// Placeholder shown before a criterion is chosen.
    pub const CRITERION_PLACEHOLDER: &str = "- SELECIONE UM CRITÉRIO -";
    /// Status text used for rows whose pedido was not found in any tab.
    pub const STATUS_NOT_FOUND: &str = "Pedido Não Encontrado";
    /// Criteria offered by default, placeholder first.
    pub const DEFAULT_CRITERIA: [&str; 17] = [
        CRITERION_PLACEHOLDER,
        "BACKLOG",
        "24600",
        "23900",
        "23880",
        "23400",
        "13770",
        "26220",
        "30030",
        "32990",
        "21400",
        "23600",
        "24000",
        "14400",
        "20330",
        "24300",
        "32220",
    ];
}

/// Allowed values on the registration form.
pub mod register {
    /// Tab new pedidos are registered into.
    pub const TARGET_TAB: &str = super::tabs::ALTA;
    /// Requesting units.
    pub const UNIDADES: [&str; 21] = [
        "ADMINISTRATIVO",
        "CEL.FABRICIANO",
        "DURVAL DE BARROS",
        "EXPEDIÇÃO",
        "GARANTIA",
        "INDUSTRIA",
        "ITAUNA",
        "JARDIM MONTANHÊS",
        "LAGOA SANTA",
        "LAVRAS",
        "MONTES CLAROS",
        "OLIVEIRA",
        "PREDIO ADM",
        "SÃO MARCOS",
        "VENDA DE VEICULOS",
        "IPATINGA",
        "MORRO ALTO",
        "NEVES",
        "NOVA LIMA",
        "VARGINHA",
        "VESPASIANO",
    ];
    /// Request statuses.
    pub const STATUS_OPTIONS: [&str; 4] = ["APROVADA", "NÃO APROVADA", "COTAÇÃO", "PEDIDO"];
    /// Evaluating areas.
    pub const AVALIACAO_OPTIONS: [&str; 3] = ["EXPEDIÇÃO", "FINANCEIRO", "UNIDADE"];
}

/// Output formatting fragments.
pub mod format {
    /// Separator between rendered bucket segments.
    pub const SEGMENT_SEPARATOR: &str = " | ";
    /// Separator between pedidos inside a segment and in previews.
    pub const PEDIDO_SEPARATOR: &str = ", ";
    /// Full date as written in sheet cells and result tables (`DD/MM/YYYY`).
    pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";
    /// Backup window endpoint rendering (`DD.MM`).
    pub const WINDOW_DATE_FORMAT: &str = "%d.%m";
    /// Joiner between backup window endpoints.
    pub const WINDOW_JOINER: &str = " a ";
    /// Preview text when nothing parses.
    pub const EMPTY_PREVIEW: &str = "Nenhum pedido válido encontrado.";
    /// Currency prefix.
    pub const CURRENCY_PREFIX: &str = "R$ ";
}
