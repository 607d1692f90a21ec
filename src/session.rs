//! Per-user session state and its transitions.
//!
//! A `Session` owns one bucket store and one search history. Every user
//! action is a method that mutates the session and returns a [`Transition`]
//! telling the presentation layer what to show and whether to redraw.
//! Sessions are independent; serve concurrent users with one session each.

use chrono::NaiveDate;
use tracing::debug;

use crate::buckets::{BucketKey, OrderAction, OrderBucketStore};
use crate::errors::TrackerError;
use crate::history::{CriterionSearchHistory, FileOutcome};
use crate::pedidos::parse_pedidos;
use crate::source::DataSource;
use crate::types::FeedbackText;

/// Message for the user, with its severity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Action applied.
    Success(FeedbackText),
    /// Nothing to do.
    Warning(FeedbackText),
    /// Action rejected; state untouched.
    Error(FeedbackText),
}

impl Feedback {
    /// Message text.
    pub fn text(&self) -> &str {
        match self {
            Feedback::Success(text) | Feedback::Warning(text) | Feedback::Error(text) => text,
        }
    }

    /// True for [`Feedback::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// Whether the visible state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderDirective {
    /// Session state changed; redraw outputs.
    Redraw,
    /// Only the feedback changed.
    Keep,
}

/// Result of one user action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Message to show.
    pub feedback: Feedback,
    /// Whether outputs need a redraw.
    pub render: RenderDirective,
    /// Reset the text input box.
    pub clear_input: bool,
    /// Text to place on the clipboard.
    pub clipboard: Option<String>,
}

impl Transition {
    fn changed(feedback: Feedback) -> Self {
        Self {
            feedback,
            render: RenderDirective::Redraw,
            clear_input: true,
            clipboard: None,
        }
    }

    fn unchanged(feedback: Feedback) -> Self {
        Self {
            feedback,
            render: RenderDirective::Keep,
            clear_input: false,
            clipboard: None,
        }
    }

    fn rejected(err: &TrackerError, purpose: &str) -> Self {
        let text = match err {
            TrackerError::CriterionNotSelected => {
                "ERRO: Por favor, selecione um critério (Carro Foco) antes de buscar.".to_string()
            }
            TrackerError::NoPedidos => {
                format!("ERRO: Nenhum pedido válido encontrado para {purpose}.")
            }
            other => format!("ERRO: {other}"),
        };
        Self::unchanged(Feedback::Error(text))
    }
}

/// State of one user's session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    buckets: OrderBucketStore,
    history: CriterionSearchHistory,
}

impl Session {
    /// Fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotated buckets.
    pub fn buckets(&self) -> &OrderBucketStore {
        &self.buckets
    }

    /// Filed searches.
    pub fn history(&self) -> &CriterionSearchHistory {
        &self.history
    }

    /// Rendered bucket output, as shown in the output box.
    pub fn formatted_output(&self) -> String {
        self.buckets.render()
    }

    /// Parse `text` and file the pedidos under `action` on `date`.
    pub fn annotate(&mut self, text: &str, action: OrderAction, date: NaiveDate) -> Transition {
        let pedidos = parse_pedidos(text);
        if pedidos.is_empty() {
            return Transition::rejected(&TrackerError::NoPedidos, "processar");
        }
        let outcome = self.buckets.upsert(BucketKey::new(action, date), &pedidos);
        debug!(%action, added = outcome.added.len(), moved = outcome.moved.len(), "annotated");
        Transition::changed(Feedback::Success(format!(
            "Pedidos processados como '{action}'. O resultado está pronto na caixa abaixo."
        )))
    }

    /// Drop every annotation.
    pub fn clear_buckets(&mut self) -> Transition {
        self.buckets.clear();
        Transition::changed(Feedback::Success(
            "Dados de formatação limpos com sucesso!".to_string(),
        ))
    }

    /// Hand the formatted output to the clipboard, if there is any.
    pub fn copy_output(&self) -> Transition {
        let output = self.formatted_output();
        if output.is_empty() {
            return Transition::unchanged(Feedback::Error(
                "ERRO: Não há texto para copiar na Saída Formatada.".to_string(),
            ));
        }
        Transition {
            clipboard: Some(output),
            ..Transition::unchanged(Feedback::Success(
                "Texto copiado para a área de transferência!".to_string(),
            ))
        }
    }

    /// Parse `text`, look the pedidos up in `sources` and file the table under `criterion`.
    pub fn search(
        &mut self,
        text: &str,
        criterion: &str,
        sources: &[&dyn DataSource],
    ) -> Transition {
        let pedidos = parse_pedidos(text);
        match self.history.search_and_file(&pedidos, criterion, sources) {
            Ok(outcome) => {
                let verb = match outcome {
                    FileOutcome::Added { .. } => "adicionada",
                    FileOutcome::Replaced { .. } => "substituída",
                };
                Transition::changed(Feedback::Success(format!(
                    "Tabela para '{criterion}' {verb}. {} pedidos processados.",
                    outcome.rows()
                )))
            }
            Err(err) => Transition::rejected(&err, "buscar"),
        }
    }

    /// Remove the most recent search table.
    pub fn remove_last_search(&mut self) -> Transition {
        match self.history.remove_last() {
            Some(table) => Transition {
                clear_input: false,
                ..Transition::changed(Feedback::Success(format!(
                    "Última pesquisa (Tabela: {}) removida com sucesso.",
                    table.criterion
                )))
            },
            None => Transition::unchanged(Feedback::Warning(
                "AVISO: Não há pesquisas no histórico para remover.".to_string(),
            )),
        }
    }

    /// Drop every search table.
    pub fn clear_history(&mut self) -> Transition {
        self.history.clear();
        Transition {
            clear_input: false,
            ..Transition::changed(Feedback::Success(
                "Histórico de buscas limpo com sucesso.".to_string(),
            ))
        }
    }
}
