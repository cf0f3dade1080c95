use rust_decimal::Decimal;

use crate::analytics::{AnalyticsBundle, StreakKind};

/// Pretty print the analytics bundle to the console.
pub fn print_summary(bundle: &AnalyticsBundle) {
    println!("\n{}", "=".repeat(60));
    println!("                 TRADING JOURNAL ANALYTICS");
    println!("{}", "=".repeat(60));
    println!("Period:             {}", bundle.period);
    println!("Reference Time:     {}", bundle.reference_time.to_rfc3339());
    println!(
        "Trades:             {} analyzed ({} in journal, {} open)",
        bundle.analyzed_trades, bundle.input_trades, bundle.open_trades
    );
    println!("{}", "-".repeat(60));

    let m = &bundle.metrics;
    println!("PERFORMANCE");
    println!("  Total P&L:          ${:.2}", m.total_pnl);
    println!(
        "  Win Rate:           {:.1}% ({} wins / {} losses)",
        m.win_rate, m.win_count, m.loss_count
    );
    println!("  Avg Win:            ${:.2}", m.avg_win);
    println!("  Avg Loss:           ${:.2}", m.avg_loss);
    println!("  Largest Win:        ${:.2}", m.largest_win);
    println!("  Largest Loss:       ${:.2}", m.largest_loss);
    println!("  Profit Factor:      {:.2}", m.profit_factor);
    println!("  Expectancy:         ${:.2}", m.expectancy);
    println!("  Avg R:R:            {:.2}", m.avg_rr);
    println!("  Kelly:              {:.1}%", clamp_percent(m.kelly_percent));
    println!("{}", "-".repeat(60));

    println!("STREAKS & DRAWDOWN");
    match bundle.streaks.current.kind {
        StreakKind::None => println!("  Current Streak:     none"),
        kind => println!(
            "  Current Streak:     {} {}",
            bundle.streaks.current.count, kind
        ),
    }
    println!(
        "  Max Win Streak:     {}",
        bundle.streaks.max_consecutive_wins
    );
    println!(
        "  Max Loss Streak:    {}",
        bundle.streaks.max_consecutive_losses
    );
    println!(
        "  Max Drawdown:       ${:.2} ({:.1}%)",
        bundle.drawdown.max_drawdown, bundle.drawdown.max_drawdown_percent
    );
    println!("  Avg Duration:       {:.1}h", bundle.avg_duration_hours);
    println!("{}", "-".repeat(60));

    println!("BY MONTH");
    for bucket in &bundle.monthly {
        println!(
            "  {}: {} trades, {:.1}% win rate, ${:.2} net P&L",
            bucket.label, bucket.trade_count, bucket.win_rate, bucket.total_pnl
        );
    }

    println!("BY WEEKDAY");
    for bucket in &bundle.weekdays {
        if bucket.trade_count == 0 {
            println!("  {:<10} no trades", bucket.day);
        } else {
            println!(
                "  {:<10} {} trades, {:.1}% win rate, ${:.2} avg P&L",
                bucket.day, bucket.trade_count, bucket.win_rate, bucket.avg_pnl
            );
        }
    }

    let active_hours: Vec<_> = bundle
        .hourly
        .iter()
        .filter(|b| b.trade_count > 0)
        .collect();
    if !active_hours.is_empty() {
        println!("BY HOUR (active only)");
        for bucket in active_hours {
            println!(
                "  {:02}:00      {} trades, {:.1}% win rate, ${:.2} avg P&L",
                bucket.hour, bucket.trade_count, bucket.win_rate, bucket.avg_pnl
            );
        }
    }

    if !bundle.emotions.is_empty() {
        println!("BY EMOTION");
        for bucket in &bundle.emotions {
            println!(
                "  {:<12} {} trades, {:.1}% win rate, ${:.2} net P&L",
                bucket.emotion, bucket.trade_count, bucket.win_rate, bucket.total_pnl
            );
        }
    }

    if let Some(trend) = &bundle.durations.trend {
        println!(
            "DURATION TREND      slope {:.4}, intercept {:.2} ({} points)",
            trend.slope,
            trend.intercept,
            bundle.durations.points.len()
        );
    }

    if let Some(last) = bundle.rolling.last() {
        println!(
            "ROLLING WIN RATE    {:.1}% over the last window ({} points)",
            last.rolling_win_rate,
            bundle.rolling.len()
        );
    }

    if !bundle.risk_reward.is_empty() {
        println!(
            "RISK/REWARD         {} planned setups in range",
            bundle.risk_reward.len()
        );
    }
    println!("{}", "=".repeat(60));
}

/// Kelly is reported raw by the engine; the console clamps it for display.
fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::from(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(dec!(-350)), Decimal::ZERO);
        assert_eq!(clamp_percent(dec!(42.5)), dec!(42.5));
        assert_eq!(clamp_percent(dec!(250)), dec!(100));
    }
}
