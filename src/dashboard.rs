//! Renders a [`MarketSnapshot`] as terminal tables. A metric that could not
//! be fetched shows the unavailable marker, never a made-up number.

use comfy_table::Cell;

use crate::aggregator::MarketSnapshot;
use crate::fx::FxKind;
use crate::indicators::RateRecord;
use crate::metrics;
use crate::ui;

/// Term used for the TEA column of the rate tables.
const RATE_TERM_DAYS: u32 = 30;

pub fn render_fx(snapshot: &MarketSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Tipo de cambio"),
        ui::header_cell("Compra"),
        ui::header_cell("Venta"),
    ]);

    match &snapshot.fx {
        Ok(board) => {
            for kind in FxKind::ALL {
                let quote = board.quote(kind);
                table.add_row(vec![
                    Cell::new(kind.label()),
                    ui::value_cell(quote.buy, 2),
                    ui::value_cell(quote.sell, 2),
                ]);
            }
        }
        Err(_) => {
            for kind in FxKind::ALL {
                table.add_row(vec![Cell::new(kind.label()), ui::error_cell(), ui::error_cell()]);
            }
        }
    }

    let mut gaps = ui::new_styled_table();
    gaps.set_header(vec![
        ui::header_cell("Brecha"),
        ui::header_cell("Valor"),
    ]);
    for gap in &snapshot.gaps {
        gaps.add_row(vec![
            Cell::new(format!(
                "{} – {}",
                gap.reference.label(),
                gap.other.label()
            )),
            ui::change_cell(gap.gap_pct),
        ]);
    }

    format!(
        "{}\n{table}\n\n{}\n{gaps}",
        ui::title("Tipo de cambio"),
        ui::title("Brechas")
    )
}

pub fn render_crypto(snapshot: &MarketSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Cripto"), ui::header_cell("Precio")]);

    let (btc, usdt) = match &snapshot.crypto {
        Ok(prices) => (prices.btc_usd, prices.usdt_ars),
        Err(_) => (None, None),
    };
    table.add_row(vec![Cell::new("BTC (USD)"), ui::value_cell(btc, 2)]);
    table.add_row(vec![Cell::new("USDT (ARS)"), ui::value_cell(usdt, 2)]);

    format!("{}\n{table}", ui::title("Cripto"))
}

fn rate_table(title: &str, rates: &[RateRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Entidad"),
        ui::header_cell("TNA (%)"),
        ui::header_cell("TEA (%)"),
    ]);
    for rate in rates {
        let tea = metrics::effective_annual_pct(rate.annual_rate_pct, RATE_TERM_DAYS);
        table.add_row(vec![
            Cell::new(&rate.label),
            ui::value_cell(Some(rate.annual_rate_pct), 1),
            ui::value_cell(Some(tea), 1),
        ]);
    }
    format!("{}\n{table}", ui::title(title))
}

pub fn render_rates(snapshot: &MarketSnapshot) -> String {
    format!(
        "{}\n\n{}",
        rate_table("Tasas de Plazo Fijo (ARS)", &snapshot.deposit_rates),
        rate_table("Tasas de Billeteras Virtuales", &snapshot.wallet_rates)
    )
}

pub fn render_indicators(snapshot: &MarketSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Indicador"),
        ui::header_cell("Valor"),
        ui::header_cell("Var. día"),
        ui::header_cell("Var. mes"),
    ]);

    let policy = snapshot
        .policy_rate
        .as_ref()
        .ok()
        .map(|r| r.annual_rate_pct);
    table.add_row(vec![
        Cell::new("Tasa de política monetaria (TNA %)"),
        ui::value_cell(policy, 2),
        Cell::new(""),
        Cell::new(""),
    ]);

    let risk = snapshot
        .country_risk
        .as_ref()
        .ok()
        .map(|r| r.basis_points as f64);
    table.add_row(vec![
        Cell::new("Riesgo país (pb)"),
        ui::value_cell(risk, 0),
        Cell::new(""),
        Cell::new(""),
    ]);

    let (level, daily, monthly) = match &snapshot.equity {
        Ok(point) => (
            Some(point.value),
            point.daily_change_pct,
            point.monthly_change_pct,
        ),
        Err(_) => (None, None, None),
    };
    table.add_row(vec![
        Cell::new("Merval"),
        ui::value_cell(level, 0),
        ui::change_cell(daily),
        ui::change_cell(monthly),
    ]);
    table.add_row(vec![
        Cell::new("Merval en USD (CCL)"),
        ui::value_cell(snapshot.equity_usd, 0),
        Cell::new(""),
        Cell::new(""),
    ]);

    format!("{}\n{table}", ui::title("Indicadores"))
}

pub fn render_dashboard(snapshot: &MarketSnapshot) -> String {
    [
        render_fx(snapshot),
        render_crypto(snapshot),
        render_rates(snapshot),
        render_indicators(snapshot),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{FxGap, builtin_deposit_rates, builtin_wallet_rates};
    use crate::format;
    use crate::fx::{FxBoard, FxQuote};
    use crate::indicators::{CountryRisk, CryptoPrices, IndexPoint, RateRecord};

    fn snapshot() -> MarketSnapshot {
        let board = FxBoard {
            official: FxQuote {
                buy: Some(970.0),
                sell: Some(980.0),
            },
            mep: FxQuote {
                buy: None,
                sell: Some(1030.0),
            },
            ..FxBoard::default()
        };
        MarketSnapshot {
            fx: Ok(board),
            gaps: vec![FxGap {
                reference: FxKind::Official,
                other: FxKind::Mep,
                gap_pct: Some(5.1),
            }],
            crypto: Ok(CryptoPrices {
                btc_usd: Some(64250.0),
                usdt_ars: None,
            }),
            policy_rate: Ok(RateRecord::new("Tasa de política monetaria", 40.0)),
            country_risk: Ok(CountryRisk { basis_points: 1312 }),
            equity: Err("yahoo down".to_string()),
            equity_usd: None,
            deposit_rates: builtin_deposit_rates(),
            wallet_rates: builtin_wallet_rates(),
        }
    }

    #[test]
    fn renders_values_in_local_format() {
        let out = render_fx(&snapshot());
        assert!(out.contains("Oficial"));
        assert!(out.contains("980"));
        assert!(out.contains("1.030"));
    }

    #[test]
    fn a_failed_source_renders_the_unavailable_marker() {
        let out = render_indicators(&snapshot());
        assert!(out.contains("Merval"));
        assert!(out.contains(format::UNAVAILABLE));
        // The healthy indicators still render.
        assert!(out.contains("1.312"));
    }

    #[test]
    fn missing_crypto_leg_is_marked_unavailable() {
        let out = render_crypto(&snapshot());
        assert!(out.contains("64.250"));
        assert!(out.contains(format::UNAVAILABLE));
    }

    #[test]
    fn dashboard_concatenates_every_section() {
        let out = render_dashboard(&snapshot());
        assert!(out.contains("Tipo de cambio"));
        assert!(out.contains("Cripto"));
        assert!(out.contains("Plazo Fijo"));
        assert!(out.contains("Indicadores"));
    }
}
