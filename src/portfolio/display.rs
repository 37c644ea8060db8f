//! Dashboard rendering and number formatting
//!
//! Rendering is read-only over the published state. Color is explicit
//! configuration passed into the formatters rather than ambient globals, so
//! a plain-text terminal gets the same layout minus the escape codes.

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::portfolio::types::{DashboardState, Portfolio, StockSuggestion};

/// Presentation configuration (the theme context of the views)
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub color: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

impl DisplayOptions {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.bright_white().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        if self.color {
            text.bright_green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.bright_red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.color {
            text.bright_yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Format a monetary value in BRL style: `R$ 1.234,56`
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (text, "00".to_string()),
    };

    // Group the integer digits in threes with '.'
    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Format a percentage share: `66,67%`
pub fn format_pct(value: Option<Decimal>) -> String {
    match value {
        Some(pct) => format!("{}%", pct.round_dp(2).to_string().replace('.', ",")),
        None => "—".to_string(),
    }
}

fn format_price(value: Option<Decimal>) -> String {
    value.map(format_brl).unwrap_or_else(|| "—".to_string())
}

fn last_refreshed_line(last_refreshed: Option<DateTime<Utc>>, opts: &DisplayOptions) -> String {
    match last_refreshed {
        Some(at) => opts.dim(&format!(
            "Última atualização: {}",
            at.format("%d/%m/%Y %H:%M:%S UTC")
        )),
        None => opts.dim("Atualizando preços..."),
    }
}

/// Grid of all carteiras with their aggregate valuations
pub fn portfolio_grid(state: &DashboardState, opts: &DisplayOptions) -> String {
    if state.portfolios.is_empty() {
        return format!(
            "{}\n{}\n",
            "Nenhuma carteira encontrada",
            opts.dim("Use 'carteira create' para começar")
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Nome", "Criada em", "Ativos", "Valor total"]);

    for portfolio in &state.portfolios {
        table.add_row(vec![
            Cell::new(portfolio.id).set_alignment(CellAlignment::Right),
            Cell::new(&portfolio.name),
            Cell::new(portfolio.created_at.format("%d/%m/%Y")),
            Cell::new(portfolio.assets.len()).set_alignment(CellAlignment::Right),
            Cell::new(format_brl(portfolio.total_value())).set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "{}\n{table}\n{}\n",
        opts.title("CARTEIRAS"),
        last_refreshed_line(state.last_refreshed, opts)
    )
}

/// Holdings table for one carteira
pub fn holdings_table(portfolio: &Portfolio, opts: &DisplayOptions) -> String {
    let description = portfolio.description.as_deref().unwrap_or("");
    let mut output = format!("{}", opts.title(&portfolio.name));
    if !description.is_empty() {
        output.push_str(&format!("\n{}", opts.dim(description)));
    }
    output.push('\n');

    if portfolio.assets.is_empty() {
        output.push_str("Nenhum ativo nesta carteira\n");
        return output;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Símbolo",
            "Qtde",
            "Preço de compra",
            "Preço atual",
            "Valor",
            "% da carteira",
        ]);

    for holding in &portfolio.assets {
        table.add_row(vec![
            Cell::new(&holding.symbol),
            Cell::new(holding.quantity).set_alignment(CellAlignment::Right),
            Cell::new(format_brl(holding.purchase_price)).set_alignment(CellAlignment::Right),
            Cell::new(format_price(holding.current_price)).set_alignment(CellAlignment::Right),
            Cell::new(format_brl(holding.market_value())).set_alignment(CellAlignment::Right),
            Cell::new(format_pct(holding.percentage)).set_alignment(CellAlignment::Right),
        ]);
    }

    output.push_str(&format!(
        "{table}\n{}\n",
        opts.accent(&format!("Total: {}", format_brl(portfolio.total_value())))
    ));
    output
}

/// Full dashboard: every carteira expanded, as shown by the watch view
pub fn dashboard(state: &DashboardState, opts: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&opts.title("PAINEL DE CARTEIRAS"));
    output.push('\n');
    output.push_str(&last_refreshed_line(state.last_refreshed, opts));
    output.push_str("\n\n");

    if let Some(error) = &state.load_error {
        output.push_str(&format!("{}\n", opts.error(error)));
        output.push_str(&opts.dim("Pressione r + Enter para tentar novamente, q ou Ctrl+C para sair"));
        output.push('\n');
        return output;
    }

    if state.portfolios.is_empty() {
        output.push_str("Nenhuma carteira encontrada\n");
        return output;
    }

    for portfolio in &state.portfolios {
        output.push_str(&holdings_table(portfolio, opts));
        output.push('\n');
    }
    output
}

/// Autocomplete results table
pub fn suggestions_table(suggestions: &[StockSuggestion]) -> String {
    if suggestions.is_empty() {
        return "Nenhum símbolo encontrado\n".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Símbolo", "Nome", "Setor", "Subsetor"]);

    for suggestion in suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.symbol),
            Cell::new(&suggestion.name),
            Cell::new(suggestion.sector.as_deref().unwrap_or("—")),
            Cell::new(suggestion.subsector.as_deref().unwrap_or("—")),
        ]);
    }

    format!("{table}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_brl_groups_thousands() {
        assert_eq!(format_brl(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(dec!(1234567.8)), "R$ 1.234.567,80");
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_brl(dec!(999)), "R$ 999,00");
    }

    #[test]
    fn test_format_brl_negative() {
        assert_eq!(format_brl(dec!(-42.5)), "-R$ 42,50");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(Some(dec!(66.666))), "66,67%");
        assert_eq!(format_pct(None), "—");
    }

    #[test]
    fn test_plain_options_emit_no_escape_codes() {
        let plain = DisplayOptions::plain();
        for styled in [
            plain.title("x"),
            plain.dim("x"),
            plain.accent("x"),
            plain.error("x"),
            plain.warning("x"),
        ] {
            assert_eq!(styled, "x");
        }

        let colored = DisplayOptions::default();
        assert!(colored.error("x").contains('\x1b'));
    }

    #[test]
    fn test_plain_dashboard_error_has_no_escape_codes() {
        let state = DashboardState {
            load_error: Some("Não foi possível carregar as carteiras".to_string()),
            ..DashboardState::default()
        };
        let rendered = dashboard(&state, &DisplayOptions::plain());
        assert!(!rendered.contains('\x1b'));
        assert!(rendered.contains("tentar novamente"));
    }

    #[test]
    fn test_empty_grid_mentions_create() {
        let rendered = portfolio_grid(&DashboardState::default(), &DisplayOptions::plain());
        assert!(rendered.contains("Nenhuma carteira"));
        assert!(rendered.contains("carteira create"));
    }
}
