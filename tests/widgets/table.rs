use beluga::fallback::demo_coins;
use beluga::transactions::demo_transactions;
use beluga::widgets::table::{filter_coins, filter_transactions, sort_coins};
use beluga::widgets::{SortKey, SortOrder, TxFilter};
use beluga::{CoinMarket, Side};
use rand::{SeedableRng, rngs::StdRng};

fn ids(coins: &[CoinMarket]) -> Vec<&str> {
    coins.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn filter_matches_name_or_symbol_ignoring_case() {
    let coins = demo_coins();

    assert_eq!(ids(&filter_coins(&coins, "ETH")), ["ethereum", "tether"]);
    assert_eq!(ids(&filter_coins(&coins, "coin")), ["bitcoin", "dogecoin"]);
    assert_eq!(filter_coins(&coins, "  ").len(), coins.len());
    assert_eq!(ids(&filter_coins(&coins, "sol")), ["solana"]);
    assert!(filter_coins(&coins, "zzz").is_empty());
}

#[test]
fn sort_by_change_descending_puts_biggest_gainer_first() {
    let mut coins = demo_coins();
    sort_coins(&mut coins, SortKey::Change24h, SortOrder::Desc);

    assert_eq!(coins[0].id, "dogecoin");
    assert_eq!(coins.last().unwrap().id, "cardano");
}

#[test]
fn missing_values_sort_last_in_both_directions() {
    let mut coins = demo_coins();
    coins[0].current_price = None;

    sort_coins(&mut coins, SortKey::Price, SortOrder::Asc);
    assert_eq!(coins.last().unwrap().id, "bitcoin");

    sort_coins(&mut coins, SortKey::Price, SortOrder::Desc);
    assert_eq!(coins.last().unwrap().id, "bitcoin");
    assert_eq!(coins[0].id, "ethereum");
}

#[test]
fn ties_fall_back_to_rank() {
    let mut coins = demo_coins();
    // tether and usd-coin both trade at exactly $1
    sort_coins(&mut coins, SortKey::Price, SortOrder::Asc);
    let tether = coins.iter().position(|c| c.id == "tether").unwrap();
    let usdc = coins.iter().position(|c| c.id == "usd-coin").unwrap();
    assert_eq!(usdc, tether + 1);
}

#[test]
fn sort_keys_parse_from_query_strings() {
    assert_eq!("market_cap".parse::<SortKey>(), Ok(SortKey::MarketCap));
    assert_eq!("price_change_percentage_24h".parse::<SortKey>(), Ok(SortKey::Change24h));
    assert!("marketcap".parse::<SortKey>().is_err());
    assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
    assert!("down".parse::<SortOrder>().is_err());
}

#[test]
fn transaction_filter_by_side_and_size() {
    let rows = demo_transactions(40, 50.0, 1_717_243_200, &mut StdRng::seed_from_u64(11));

    let sells = filter_transactions(&rows, &TxFilter { side: Some(Side::Sell), min_usd: None });
    assert!(sells.iter().all(|t| t.side == Side::Sell));

    let whales = filter_transactions(&rows, &TxFilter { side: None, min_usd: Some(25_000.0) });
    assert!(whales.iter().all(|t| t.usd_amount.is_some_and(|u| u >= 25_000.0)));

    let all = filter_transactions(&rows, &TxFilter::default());
    assert_eq!(all.len(), 40);
    assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn min_usd_drops_unpriced_rows() {
    let mut rows = demo_transactions(3, 1.0, 100, &mut StdRng::seed_from_u64(2));
    rows[1].usd_amount = None;

    let kept = filter_transactions(&rows, &TxFilter { side: None, min_usd: Some(0.0) });
    assert_eq!(kept.len(), 2);
}
