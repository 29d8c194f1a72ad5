use beluga::fallback::demo_coins;
use beluga::widgets::Heat;
use beluga::widgets::heatmap::tiles;

#[test]
fn heat_bucket_edges() {
    assert_eq!(Heat::from_change(-12.0), Heat::StrongDown);
    assert_eq!(Heat::from_change(-5.0), Heat::StrongDown);
    assert_eq!(Heat::from_change(-4.99), Heat::Down);
    assert_eq!(Heat::from_change(-1.0), Heat::Flat);
    assert_eq!(Heat::from_change(0.0), Heat::Flat);
    assert_eq!(Heat::from_change(1.0), Heat::Flat);
    assert_eq!(Heat::from_change(1.01), Heat::Up);
    assert_eq!(Heat::from_change(4.99), Heat::Up);
    assert_eq!(Heat::from_change(5.0), Heat::StrongUp);
}

#[test]
fn tiles_are_weighted_by_market_cap() {
    let coins = demo_coins();
    let t = tiles(&coins, 5);

    assert_eq!(t.len(), 5);
    assert_eq!(t[0].symbol, "BTC");
    assert!(t.windows(2).all(|w| w[0].market_cap >= w[1].market_cap));

    let sum: f64 = t.iter().map(|x| x.weight).sum();
    assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");

    let sol = t.iter().find(|x| x.id == "solana").unwrap();
    assert_eq!(sol.heat, Heat::StrongUp);
}

#[test]
fn coins_without_market_cap_are_skipped() {
    let mut coins = demo_coins();
    coins[0].market_cap = None;
    coins[1].market_cap = Some(0.0);

    let t = tiles(&coins, 100);
    assert_eq!(t.len(), coins.len() - 2);
    assert!(t.iter().all(|x| x.id != "bitcoin" && x.id != "ethereum"));
}

#[test]
fn missing_change_reads_as_flat() {
    let mut coins = demo_coins();
    coins[0].price_change_percentage_24h = None;

    let t = tiles(&coins, 1);
    assert_eq!(t[0].heat, Heat::Flat);
    assert_eq!(t[0].change_24h, None);
}

#[test]
fn empty_input_gives_no_tiles() {
    assert!(tiles(&[], 10).is_empty());
    assert!(tiles(&demo_coins(), 0).is_empty());
}
