use rand::Rng;

use super::model::{Side, Transaction, TxSource};

fn hex_string<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut s = String::with_capacity(digits + 2);
    s.push_str("0x");
    for _ in 0..digits {
        s.push(char::from(HEX[rng.random_range(0..16)]));
    }
    s
}

/// Synthetic transactions for when no upstream answers.
///
/// Records are newest first: the first is stamped `now`, each following one 5 to 120
/// seconds earlier. Prices stay within 2% of `base_price`; USD sizes fall in 50..50 000.
pub fn demo_transactions<R: Rng + ?Sized>(
    count: usize,
    base_price: f64,
    now: i64,
    rng: &mut R,
) -> Vec<Transaction> {
    let base_price = if base_price.is_finite() && base_price > 0.0 {
        base_price
    } else {
        1.0
    };

    let mut ts = now;
    (0..count)
        .map(|i| {
            if i > 0 {
                ts -= rng.random_range(5..=120);
            }
            let price = base_price * (1.0 + rng.random_range(-0.02..=0.02));
            let usd = rng.random_range(50.0..50_000.0);
            Transaction {
                hash: hex_string(rng, 64),
                wallet: Some(hex_string(rng, 40)),
                side: if rng.random_bool(0.5) { Side::Buy } else { Side::Sell },
                token_amount: usd / price,
                usd_amount: Some(usd),
                price_usd: Some(price),
                timestamp: ts,
                source: TxSource::Demo,
            }
        })
        .collect()
}
