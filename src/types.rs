/// Order (pedido) identifier: a non-empty run of ASCII digits.
/// Examples: `045`, `123`, `998877`
pub type PedidoId = String;
/// Name of the tab a record was loaded from.
/// Examples: `ALTA`, `EMERGENCIAL`, `06.10 a 10.10`
pub type SourceName = String;
/// Label a batch search is filed under.
/// Examples: `BACKLOG`, `24600`, `06.10 a 10.10`
pub type Criterion = String;
/// Display label of a backup window / backup tab.
/// Example: `06.10 a 10.10`
pub type WindowLabel = String;
/// Raw spreadsheet cell text as handed over by a sheet provider.
/// Examples: `R$ 1.234,56`, `10/05/2025`, `PAGO`
pub type Cell = String;
/// Raw tab contents, row-major.
pub type Grid = Vec<Vec<Cell>>;
/// User-facing feedback text.
/// Examples: `ERRO: Nenhum pedido válido encontrado para processar.`
pub type FeedbackText = String;
