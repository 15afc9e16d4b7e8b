//! CSV rendering of stock analysis summaries.

use crate::domain::stock::Stock;

const HEADER: &str = "ticker,companyName,sector,industry,flexbitScore,businessQuality,\
timingLabel,diagnosis,synthesis,investorProfile,vqsgV,vqsgQ,vqsgS,vqsgG,lastPrice,\
priceChangePercent,signalCall,entryPrice,targetPrice,stopLoss";

/// Renders the export column set for a list of stocks.
pub(crate) fn stocks_to_csv(stocks: &[Stock]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for stock in stocks {
        let a = &stock.analysis;
        let t = &stock.technical;
        let fields: Vec<String> = vec![
            escape_str(&stock.ticker),
            escape_str(&stock.company_name),
            escape_opt(stock.sector.as_deref()),
            escape_opt(stock.industry.as_deref()),
            num(a.flexbit_score),
            escape_opt(a.business_quality.as_deref()),
            escape_opt(a.timing_label.as_deref()),
            escape_opt(a.flexbit_diagnosis.as_deref()),
            escape_opt(a.synthesis.description.as_deref()),
            escape_opt(a.investor_profile.as_deref()),
            num(a.vqsg.v),
            num(a.vqsg.q),
            num(a.vqsg.s),
            num(a.vqsg.g),
            num(t.last_price),
            num(t.price_change_percent),
            escape_opt(t.signals.call.as_deref()),
            num(t.signals.entry_price),
            num(t.signals.tp1),
            num(t.signals.stop_loss),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape_opt(value: Option<&str>) -> String {
    value.map(escape_str).unwrap_or_default()
}

/// Quotes fields containing separators, quotes or newlines.
fn escape_str(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stock::{Analysis, Stock};

    #[test]
    fn header_row_is_first() {
        let csv = stocks_to_csv(&[]);
        assert!(csv.starts_with("ticker,companyName"));
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let stock = Stock {
            ticker: "BBCA".to_string(),
            company_name: "Bank Central Asia, Tbk".to_string(),
            analysis: Analysis {
                flexbit_score: Some(87.5),
                ..Default::default()
            },
            ..Default::default()
        };
        let csv = stocks_to_csv(&[stock]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Bank Central Asia, Tbk\""));
        assert!(row.contains("87.5"));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let stock = Stock {
            ticker: "X".to_string(),
            company_name: "The \"X\" Company".to_string(),
            ..Default::default()
        };
        let csv = stocks_to_csv(&[stock]);
        assert!(csv.contains("\"The \"\"X\"\" Company\""));
    }

    #[test]
    fn missing_values_render_empty() {
        let stock = Stock {
            ticker: "Y".to_string(),
            company_name: "Y Corp".to_string(),
            ..Default::default()
        };
        let csv = stocks_to_csv(&[stock]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("Y,Y Corp,,,"));
    }
}
