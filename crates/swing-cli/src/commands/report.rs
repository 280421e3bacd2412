//! 개별 분석 / 종목 상세 출력.

use anyhow::{bail, Context, Result};
use tracing::info;

use swing_analytics::{CompanyView, IndividualView, ReportService, ViewStatus};

/// 개별 분석을 실행하고 출력합니다.
pub async fn run_individual(service: &ReportService, code: &str, json: bool) -> Result<()> {
    let outcome = service.individual(code).await;
    let view = IndividualView::from(&outcome);
    info!(status = ?view.status, "Individual report rendered");

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize report")?
        );
    } else {
        println!("{}", render_individual(&view));
    }

    finish(view.status, view.message.as_deref())
}

/// 종목 상세를 실행하고 출력합니다.
pub async fn run_company(service: &ReportService, code: &str, json: bool) -> Result<()> {
    let outcome = service.company(code).await;
    let view = CompanyView::from(&outcome);
    info!(status = ?view.status, "Company report rendered");

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize report")?
        );
    } else {
        println!("{}", render_company(&view));
    }

    finish(view.status, view.message.as_deref())
}

/// 에러 화면이면 0이 아닌 종료 코드가 되도록 에러를 반환합니다.
fn finish(status: ViewStatus, message: Option<&str>) -> Result<()> {
    if status == ViewStatus::Error {
        bail!("{}", message.unwrap_or("report failed"));
    }
    Ok(())
}

fn push_line(output: &mut String, label: &str, value: &str) {
    output.push_str(&format!("  {:<14} {}\n", label, value));
}

fn with_status(value: &str, status: Option<&str>) -> String {
    match status {
        Some(status) => format!("{} ({})", value, status),
        None => value.to_string(),
    }
}

/// 개별 분석 텍스트 출력.
pub fn render_individual(view: &IndividualView) -> String {
    let mut output = String::new();

    if let Some(code) = &view.code {
        output.push_str(&format!("[{}]", code));
        if let Some(url) = &view.chart_url {
            output.push_str(&format!(" {}", url));
        }
        output.push('\n');
    }
    if let Some(message) = &view.message {
        output.push_str(message);
        output.push('\n');
    }

    if let Some(t) = &view.trinity {
        output.push_str("\n三位一体モデル評価\n");
        push_line(&mut output, "現在価格", &t.price);
        push_line(&mut output, "スコア", &t.score);
        push_line(&mut output, "RSI(9)", &with_status(&t.rsi_9, t.rsi_status));
        push_line(&mut output, "VWAP", &with_status(&t.vwap, t.vwap_trend));
        push_line(&mut output, "BB幅", &with_status(&t.bb_width, t.bb_status));
        push_line(&mut output, "利食い目標", &t.profit_target);
        push_line(&mut output, "損切りライン", &t.stop_loss);
    }

    if let Some(b) = &view.bandwalk {
        output.push_str("\nバンドウォーク\n");
        push_line(&mut output, "現在価格", &b.price);
        push_line(&mut output, "検出", &b.status);
        push_line(&mut output, "BB幅", &with_status(&b.bb_width, b.bb_status));
        push_line(&mut output, "利食い目標", &b.profit_target);
        push_line(&mut output, "損切りライン", &b.stop_loss);
    }

    if let Some(e) = &view.expansion {
        output.push_str("\nエクスパンション\n");
        push_line(&mut output, "現在価格", &e.price);
        push_line(&mut output, "検出", &e.status);
        push_line(&mut output, "BB幅", &with_status(&e.bb_width, e.bb_status));
        push_line(&mut output, "拡大率", &with_status(&e.expansion_rate, e.rate_status));
        push_line(&mut output, "利食い目標", &e.profit_target);
        push_line(&mut output, "損切りライン", &e.stop_loss);
    }

    output.trim_end().to_string()
}

/// 종목 상세 텍스트 출력.
pub fn render_company(view: &CompanyView) -> String {
    let Some(d) = &view.detail else {
        return view.message.clone().unwrap_or_default();
    };

    let mut output = String::new();
    output.push_str(&format!("[{}] {} ({})\n", d.symbol, d.company_name, d.as_of));
    push_line(&mut output, "終値", &d.close);
    push_line(&mut output, "始値", &d.open);
    push_line(&mut output, "高値", &d.high);
    push_line(&mut output, "安値", &d.low);
    push_line(&mut output, "出来高", &d.volume);

    output.push_str("\nテクニカル\n");
    push_line(&mut output, "RSI", &format!("{}（{}）", d.rsi, d.rsi_comment));
    push_line(
        &mut output,
        "MACD",
        &format!("{} / {} / 信頼度{}", d.macd_cross, d.macd_direction, d.macd_confidence),
    );
    push_line(
        &mut output,
        "移動平均",
        &format!("DEV5 {} / DEV25 {} / {}", d.dev5, d.dev25, d.ma_spread_trend),
    );
    push_line(&mut output, "出来高変化", &d.volume_change);
    push_line(&mut output, "5日変動幅", &d.volatility);
    push_line(&mut output, "β", &d.beta);
    let cci = format!("{} スコア {} {}", d.cci, d.cci_score, d.cci_expectation);
    push_line(&mut output, "CCI", &cci);
    let earnings = if d.earnings_highlight {
        format!("{} ⚠", d.earnings_date)
    } else {
        d.earnings_date.clone()
    };
    push_line(&mut output, "決算発表", &earnings);
    push_line(&mut output, "信用倍率", &d.credit_ratio);
    push_line(&mut output, "判定", &d.final_judgement);
    push_line(&mut output, "シグナル", &d.signals);

    output.push_str(&format!(
        "\n総合スコア {}点 ({})\n",
        d.score.composite, d.score.band
    ));
    for sub in &d.score.subscores {
        let sign = if sub.penalty { "-" } else { "+" };
        output.push_str(&format!(
            "  {} {:<10} {}/5  {}\n",
            sign, sub.factor, sub.value, sub.comment
        ));
    }

    output.push_str(&format!("\n{}\n", d.news_heading));
    if let Some(message) = &d.news_message {
        output.push_str(&format!("  {}\n", message));
    }
    for item in &d.news {
        output.push_str(&format!(
            "  - {}",
            item.title.as_deref().unwrap_or("(no title)")
        ));
        if let Some(url) = &item.url {
            output.push_str(&format!(" <{}>", url));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swing_analytics::{score_report, CompanyOutcome, CompanyReport, IndividualOutcome};
    use swing_core::{InstrumentReport, ParsedBundle, TrinityMetrics};

    #[test]
    fn test_render_individual_trinity() {
        let mut bundle = ParsedBundle::empty("7203".parse().unwrap());
        bundle.trinity = Some(TrinityMetrics {
            price: Some(1000.0),
            score: Some(55),
            status: Some(swing_core::ScoreStatus::Medium),
            profit_target: Some(1100.0),
            ..Default::default()
        });
        let view = IndividualView::from(&IndividualOutcome::Parsed(bundle));
        let text = render_individual(&view);

        assert!(text.starts_with("[7203] https://kabutan.jp/stock/chart?code=7203"));
        assert!(text.contains("55点 (中評価)"));
        assert!(text.contains("1100円 (+10%)"));
        assert!(!text.contains("バンドウォーク"));
    }

    #[test]
    fn test_render_individual_idle() {
        let view = IndividualView::from(&IndividualOutcome::Idle);
        assert_eq!(render_individual(&view), "銘柄コードを入力してください。");
        assert!(finish(view.status, view.message.as_deref()).is_ok());
    }

    #[test]
    fn test_render_company_without_news() {
        let mut report = InstrumentReport::empty("7203");
        report.rsi = Some(45.0);
        report.rsi_comment = Some("中立".to_string());
        let score = score_report(&report);
        let view = CompanyView::from(&CompanyOutcome::Ready(Box::new(CompanyReport {
            report,
            score,
        })));
        let text = render_company(&view);

        assert!(text.contains("45.00（中立）"));
        assert!(text.contains("ニュース（最大10件）"));
        assert!(text.contains("ニュースが取得できませんでした。"));
        assert!(text.contains("上昇力"));
    }

    #[test]
    fn test_error_view_fails_command() {
        let view = CompanyView::from(&CompanyOutcome::Failed(swing_core::ReportError::FetchFailed));
        let err = finish(view.status, view.message.as_deref()).unwrap_err();
        assert!(err.to_string().contains("銘柄データの取得に失敗しました"));
    }
}
