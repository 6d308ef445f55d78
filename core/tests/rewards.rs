use fillscout_core::{reward, survey::Plan};

#[test]
fn catalog_tiers_produce_the_documented_unit_rewards() {
    let (price, total) = Plan::Basic.resolve().unwrap();
    assert_eq!(reward::unit_reward(price, total), 3.00);

    let (price, total) = Plan::Standard.resolve().unwrap();
    assert_eq!(reward::unit_reward(price, total), 2.50);

    let (price, total) = Plan::Premium.resolve().unwrap();
    assert_eq!(reward::unit_reward(price, total), 2.00);

    // custom: responses 500 → price 1000, unit 2.00
    let (price, total) = Plan::Custom { responses: 500 }.resolve().unwrap();
    assert_eq!(price, 1000.0);
    assert_eq!(reward::unit_reward(price, total), 2.00);
}

#[test]
fn rounds_to_two_decimals_half_up() {
    // 100 / 3 = 33.333…
    assert_eq!(reward::unit_reward(100.0, 3), 33.33);
    // 1 / 8 = 0.125, half-up lands on 0.13
    assert_eq!(reward::unit_reward(1.0, 8), 0.13);
    // 2 / 3 = 0.666…
    assert_eq!(reward::unit_reward(2.0, 3), 0.67);
}

#[test]
fn zero_response_target_is_guarded() {
    // max(total, 1) — never divides by zero
    assert_eq!(reward::unit_reward(300.0, 0), 300.00);
}

#[test]
fn payout_sum_stays_within_epsilon_of_price() {
    for total in [7u32, 33, 100, 999] {
        let price = 250.0;
        let unit = reward::unit_reward(price, total);
        let paid = unit * f64::from(total);
        assert!(
            paid <= price + f64::from(total) * reward::ROUNDING_EPSILON,
            "total {total}: paid {paid} exceeds price {price} beyond epsilon"
        );
    }
}
