//! 일별 결과 / 분석 일자 출력.

use anyhow::{Context, Result};
use tracing::info;

use swing_analytics::{default_results_date, group_dates, DailyResultsView, YearGroup};
use swing_core::{AnalysisDate, DatabaseConfig};
use swing_data::ResultsStore;

/// 하루치 결과를 조회하고 출력합니다.
pub async fn run_results(
    database: &DatabaseConfig,
    date: Option<&str>,
    active_only: bool,
    json: bool,
) -> Result<()> {
    let date = match date {
        Some(raw) => AnalysisDate::parse(raw).with_context(|| format!("Invalid date: {}", raw))?,
        None => default_results_date(),
    };

    let store = ResultsStore::connect(database)
        .await
        .context("Failed to open results database")?;

    let trinity = store.trinity_results(&date).await?;
    let bandwalk = store.bandwalk_results(&date).await?;
    let expansion = store.expansion_results(&date).await?;
    info!(
        date = %date,
        trinity = trinity.len(),
        bandwalk = bandwalk.len(),
        expansion = expansion.len(),
        "Daily results loaded"
    );

    let view = DailyResultsView::build(&date, &trinity, &bandwalk, &expansion, active_only);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize results")?
        );
    } else {
        println!("{}", render_daily(&view));
    }
    Ok(())
}

/// 분석 일자 인덱스를 출력합니다.
pub async fn run_dates(database: &DatabaseConfig, json: bool) -> Result<()> {
    let store = ResultsStore::connect(database)
        .await
        .context("Failed to open results database")?;
    let dates = store.list_analysis_dates().await?;
    let years = group_dates(&dates);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&years).context("Failed to serialize dates")?
        );
    } else {
        println!("{}", render_dates(&years));
    }
    Ok(())
}

/// 하루치 결과 테이블.
pub fn render_daily(view: &DailyResultsView) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} の分析結果\n", view.heading));

    output.push_str(&format!("\n三位一体モデル ({}件)\n", view.trinity.len()));
    output.push_str(&format!(
        "{:<6} {:<20} {:>9} {:<16} {:<18} {:>9} {:>4} {:<16} {:<16}\n",
        "CODE", "NAME", "PRICE", "SCORE", "RSI(9)", "VWAP", "BB", "TARGET", "STOP"
    ));
    for row in &view.trinity {
        output.push_str(&format!(
            "{:<6} {:<20} {:>9} {:<16} {:<18} {:>9} {:>4} {:<16} {:<16}\n",
            row.code,
            truncate(&row.company_name, 20),
            row.price,
            format!("{}点 ({})", row.score, row.status),
            format!("{} ({})", row.rsi_9, row.rsi_status),
            row.vwap,
            row.bb_width,
            row.profit_target,
            row.stop_loss,
        ));
    }

    output.push_str(&format!("\nバンドウォーク ({}件)\n", view.bandwalk.len()));
    for row in &view.bandwalk {
        output.push_str(&format!(
            "{:<6} {:<20} {:>9} {:<10} {:>4} {:<16} {:<16}\n",
            row.code,
            truncate(&row.company_name, 20),
            row.price,
            row.badge,
            row.bb_width,
            row.profit_target,
            row.stop_loss,
        ));
    }

    output.push_str(&format!("\nエクスパンション ({}件)\n", view.expansion.len()));
    for row in &view.expansion {
        output.push_str(&format!(
            "{:<6} {:<20} {:>9} {:<10} {:>4} {:>5} {:<16} {:<16}\n",
            row.code,
            truncate(&row.company_name, 20),
            row.price,
            row.badge,
            row.bb_width,
            row.expansion_rate,
            row.profit_target,
            row.stop_loss,
        ));
    }

    if view.is_empty() {
        output.push_str("\nこの日の分析結果はありません。\n");
    }

    output.trim_end().to_string()
}

/// 분석 일자 트리.
pub fn render_dates(years: &[YearGroup]) -> String {
    let mut output = String::new();
    for year in years {
        output.push_str(&format!("{}年\n", year.year));
        for month in &year.months {
            let days: Vec<&str> = month.days.iter().map(|d| d.label.as_str()).collect();
            output.push_str(&format!("  {}: {}\n", month.heading, days.join(" ")));
        }
    }
    if output.is_empty() {
        output.push_str("分析結果はまだありません。");
    }
    output.trim_end().to_string()
}

/// 문자 단위로 자릅니다.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> AnalysisDate {
        AnalysisDate::parse(s).unwrap()
    }

    #[test]
    fn test_render_dates_tree() {
        let years = group_dates(&[date("2024-05-08"), date("2024-05-07"), date("2023-12-28")]);
        let text = render_dates(&years);
        assert_eq!(
            text,
            "2024年\n  2024年5月: 8日 7日\n2023年\n  2023年12月: 28日"
        );
        assert_eq!(render_dates(&[]), "分析結果はまだありません。");
    }

    #[test]
    fn test_render_empty_day() {
        let view = DailyResultsView::build(&date("2024-05-08"), &[], &[], &[], true);
        let text = render_daily(&view);
        assert!(text.starts_with("2024年05月08日 の分析結果"));
        assert!(text.contains("三位一体モデル (0件)"));
        assert!(text.ends_with("この日の分析結果はありません。"));
    }

    #[test]
    fn test_truncate_by_chars() {
        assert_eq!(truncate("トヨタ自動車", 10), "トヨタ自動車");
        assert_eq!(truncate("ソニーグループ株式会社", 5), "ソニーグ…");
    }
}
