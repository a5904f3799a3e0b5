#[cfg(test)]
mod report_tests {
    use crate::input::{PricePoint, WalletInput};
    use crate::report::{analyze_wallet, build_tag_inputs, LedgerSummary};
    use alpha_beta::{AttributionResult, AttributionVerdict};
    use behavior_tags::{classify, TagKind};
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use dna_core::{EngineConfig, Locale, ReturnPoint, ReturnSeries, TradeAction, TradeRecord};
    use ledger_processor::TokenConcentration;
    use risk_metrics::RiskMetrics;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time_decay::{TimeWindowResult, WindowStats};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
    }

    fn bench_returns() -> Vec<f64> {
        vec![
            0.012, -0.008, 0.021, -0.015, 0.004, 0.017, -0.022, 0.009, 0.013, -0.006,
            0.011, -0.013, 0.007, 0.019, -0.004, -0.010, 0.015, 0.002, -0.018, 0.008,
        ]
    }

    fn series_from(start: NaiveDate, values: &[f64]) -> ReturnSeries {
        ReturnSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| ReturnPoint::new(start + Duration::days(i as i64), *v))
                .collect(),
        )
        .unwrap()
    }

    fn trade(
        ts: DateTime<Utc>,
        token: &str,
        action: TradeAction,
        price: Decimal,
        pnl: Decimal,
    ) -> TradeRecord {
        TradeRecord::new(ts, token, action, dec!(100), price).with_realized_pnl(pnl)
    }

    fn recent_ledger() -> Vec<TradeRecord> {
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap();
        vec![
            trade(at(1, 10), "WIF", TradeAction::Buy, dec!(2), dec!(0)),
            trade(at(3, 10), "WIF", TradeAction::Sell, dec!(7), dec!(500)),
            trade(at(10, 8), "BONK", TradeAction::Buy, dec!(3), dec!(0)),
            trade(at(11, 8), "BONK", TradeAction::Sell, dec!(2), dec!(-100)),
        ]
    }

    #[test]
    fn test_end_to_end_report() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let bench = bench_returns();
        let wallet: Vec<f64> = bench.iter().map(|r| 2.0 * r + 0.001).collect();

        let input = WalletInput {
            wallet_address: "0xfeed".to_string(),
            wallet_returns: series_from(start, &wallet),
            benchmark_returns: series_from(start, &bench),
            trades: recent_ledger(),
            ..Default::default()
        };
        let config = EngineConfig::default();
        let report = analyze_wallet(&input, &config, now());

        assert_eq!(report.wallet_address, "0xfeed");
        assert_eq!(report.generated_at, now());
        assert!((report.attribution.beta - 2.0).abs() < 1e-9);
        assert!(
            (report.attribution.alpha_contribution + report.attribution.beta_contribution
                - report.attribution.total_return)
                .abs()
                < 1e-9
        );
        assert_eq!(report.risk.observations, 20);
        assert!(report.risk.max_drawdown <= 0.0);

        assert_eq!(report.time_decay.all_time.trade_count, 4);
        assert_eq!(report.time_decay.d30.trade_count, 4);
        assert!((report.time_decay.all_time.pnl - 400.0).abs() < 1e-9);

        assert_eq!(report.ledger.stats.total_trades, 4);
        assert!((report.ledger.average_hold_hours - 36.0).abs() < 1e-9);
        assert_eq!(report.ledger.initial_capital, None);

        assert!(report.tag_inputs.recent_activity);
        assert_eq!(report.tag_inputs.win_rate, report.risk.win_rate);
        assert_eq!(report.tag_inputs.alpha_pct, report.attribution.alpha_pct);
        assert!(!report.tags.iter().any(|t| t.kind == TagKind::Dormant));

        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "attribution",
            "attribution_interpretation",
            "risk",
            "risk_interpretation",
            "time_decay",
            "decay_interpretation",
            "tags",
            "tag_summary",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["time_decay"].get("30d").is_some());
    }

    #[test]
    fn test_empty_input_yields_zero_report() {
        let report = analyze_wallet(&WalletInput::default(), &EngineConfig::default(), now());
        assert_eq!(report.attribution, AttributionResult::default());
        assert_eq!(report.risk, RiskMetrics::default());
        assert_eq!(report.time_decay, TimeWindowResult::default());
        assert!(report.tags.is_empty());
        assert_eq!(report.tag_summary, "No distinctive traits");
        assert_eq!(report.attribution_interpretation.verdict, AttributionVerdict::Lucky);
    }

    #[test]
    fn test_benchmark_prices_align_with_wallet() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let bench = bench_returns();
        let wallet: Vec<f64> = bench.iter().map(|r| 0.5 * r).collect();

        let mut price = 3000.0;
        let mut prices = vec![PricePoint {
            date: start - Duration::days(1),
            price,
        }];
        for (i, r) in bench.iter().enumerate() {
            price *= 1.0 + r;
            prices.push(PricePoint {
                date: start + Duration::days(i as i64),
                price,
            });
        }

        let input = WalletInput {
            wallet_returns: series_from(start, &wallet),
            benchmark_prices: prices,
            ..Default::default()
        };
        let report = analyze_wallet(&input, &EngineConfig::default(), now());
        assert_eq!(report.attribution.observations, 20);
        assert!((report.attribution.beta - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_returns_derived_from_ledger() {
        let input = WalletInput {
            trades: recent_ledger(),
            initial_capital: Some(2000.0),
            ..Default::default()
        };
        let report = analyze_wallet(&input, &EngineConfig::default(), now());

        assert_eq!(report.ledger.initial_capital, Some(2000.0));
        // June 1 through June 11
        assert_eq!(report.risk.observations, 11);
        assert_eq!(report.risk.max_win_streak, 1);
        assert_eq!(report.risk.max_loss_streak, 1);
    }

    #[test]
    fn test_recomputed_pnl_feeds_every_component() {
        let at = |d: u32| Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap();
        let input = WalletInput {
            trades: vec![
                trade(at(2), "JUP", TradeAction::Buy, dec!(1), dec!(0)),
                trade(at(5), "JUP", TradeAction::Sell, dec!(1.5), dec!(0)),
            ],
            recompute_pnl: true,
            ..Default::default()
        };
        let report = analyze_wallet(&input, &EngineConfig::default(), now());
        assert!((report.ledger.total_realized_pnl - 50.0).abs() < 1e-9);
        assert!((report.time_decay.all_time.pnl - 50.0).abs() < 1e-9);
        assert_eq!(report.time_decay.all_time.win_rate, 0.5);
        // volume 250 USD, so the capital floor applies
        assert_eq!(report.ledger.initial_capital, Some(1000.0));
    }

    #[test]
    fn test_old_ledger_is_dormant() {
        let old = now() - Duration::days(100);
        let input = WalletInput {
            trades: vec![
                trade(old, "WIF", TradeAction::Buy, dec!(2), dec!(0)),
                trade(old + Duration::days(10), "WIF", TradeAction::Sell, dec!(3), dec!(100)),
            ],
            ..Default::default()
        };
        let report = analyze_wallet(&input, &EngineConfig::default(), now());
        let kinds: Vec<TagKind> = report.tags.iter().map(|t| t.kind).collect();

        assert!(!report.tag_inputs.recent_activity);
        assert!(kinds.contains(&TagKind::Dormant));
        assert!(kinds.contains(&TagKind::DiamondHands));
        assert!(!kinds.contains(&TagKind::ActiveTrader));
    }

    #[test]
    fn test_merged_inputs_reproduce_skilled_holder_scenario() {
        let ledger = LedgerSummary {
            trade_frequency: 3.0,
            average_hold_hours: 200.0,
            concentration: TokenConcentration {
                top_trade_contribution: 0.2,
                ..Default::default()
            },
            ..Default::default()
        };
        let attribution = AttributionResult {
            alpha_pct: 70.0,
            ..Default::default()
        };
        let risk = RiskMetrics {
            win_rate: 0.75,
            profit_factor: 2.0,
            sharpe_ratio: 2.5,
            max_drawdown: -0.1,
            ..Default::default()
        };
        let decay = TimeWindowResult {
            d30: WindowStats {
                trade_count: 5,
                ..Default::default()
            },
            ..Default::default()
        };

        let inputs = build_tag_inputs(&ledger, &attribution, &risk, &decay, None);
        let config = EngineConfig::default();
        let tags = classify(&inputs, &config.tags, Locale::English);
        let kinds: Vec<TagKind> = tags.iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TagKind::DiamondHands,
                TagKind::Sniper,
                TagKind::Conservative,
                TagKind::SmartMoney
            ]
        );
        assert_eq!(tags, classify(&inputs, &config.tags, Locale::English));
    }

    #[test]
    fn test_chinese_report_text() {
        let config = EngineConfig {
            locale: Locale::Chinese,
            ..Default::default()
        };
        let report = analyze_wallet(&WalletInput::default(), &config, now());
        assert_eq!(report.locale, Locale::Chinese);
        assert_eq!(report.tag_summary, "暂无明显特征");
        assert_eq!(report.risk_interpretation.sharpe_text, "较差");
        assert_eq!(report.decay_interpretation.summary_text, "数据不足，无法做出判断");
    }
}
