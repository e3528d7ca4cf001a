use pm_core::Quantity::{Capacity, LatentCapacity, Power, SensibleCapacity};
use pm_core::Variable::{Afr, Freq, Tdbo, Tdbr, Twbr};
use pm_core::nearly_equal;
use pm_map::{PerformanceMap, RatedValues};
use pm_table::{MultiIndex, Table};

/// A small manufacturer cooling table: capacity and power over two
/// room conditions (wet bulb tied to dry bulb) and three outdoor
/// temperatures, taken at rated frequency and air flow.
fn cooling_table() -> Table {
    let index = MultiIndex::new(
        vec![Tdbr, Twbr, Tdbo],
        vec![
            vec![17.8, 12.2, 25.0],
            vec![17.8, 12.2, 35.0],
            vec![17.8, 12.2, 46.0],
            vec![32.2, 22.8, 25.0],
            vec![32.2, 22.8, 35.0],
            vec![32.2, 22.8, 46.0],
        ],
    )
    .expect("index should build");
    Table::new(
        index,
        vec![
            (Capacity, vec![3.19, 2.98, 2.54, 4.44, 3.94, 3.07]),
            (Power, vec![0.61, 0.68, 0.74, 0.65, 0.81, 0.75]),
        ],
    )
    .expect("table should build")
}

fn frequency_entries() -> Vec<f64> {
    (1..=13).map(|i| i as f64 / 10.0).collect()
}

#[test]
fn cooling_fillmap_end_to_end() {
    let rated = RatedValues::from_power_capacity(0.79, 3.52);
    let filled = PerformanceMap::new(cooling_table())
        .set_entries(Freq, frequency_entries())
        .set_entries(Afr, vec![0.0, 1.0])
        .set_mode("cooling")
        .expect("mode should parse")
        .fillmap(Some(&rated))
        .expect("fillmap should succeed");

    // Columns and index levels in the exported order.
    assert_eq!(
        filled.table().columns(),
        &[Power, SensibleCapacity, LatentCapacity]
    );
    assert_eq!(
        filled.table().index().levels(),
        &[Tdbr, Twbr, Tdbo, Afr, Freq]
    );

    // 6 original rows × 13 freq × 2 AFR × 2 unique wet-bulb values.
    assert_eq!(filled.table().n_rows(), 6 * 13 * 2 * 2);
    assert!(filled.normalized());

    let unique_freq = filled.table().unique_level_values(Freq).unwrap();
    assert_eq!(unique_freq.len(), 13);
    assert_eq!(filled.table().unique_level_values(Twbr).unwrap().len(), 2);

    // The sensible/latent split never produces negative parts and the
    // normalized magnitudes stay near one at the rated entries.
    let power = filled.table().column(Power).unwrap();
    let sensible = filled.table().column(SensibleCapacity).unwrap();
    let latent = filled.table().column(LatentCapacity).unwrap();
    for ((p, s), l) in power.iter().zip(sensible).zip(latent) {
        assert!(*p >= 0.0);
        assert!(*s >= 0.0);
        assert!(*l >= 0.0);
    }

    let freq = filled.table().level_values(Freq).unwrap();
    let afr = filled.table().level_values(Afr).unwrap();
    for (row, (f, a)) in freq.iter().zip(&afr).enumerate() {
        if nearly_equal(*f, 1.0) && nearly_equal(*a, 1.0) {
            let total = sensible[row] + latent[row];
            assert!(power[row] > 0.05 && power[row] < 20.0);
            assert!(total > 0.05 && total < 20.0);
        }
    }
}

#[test]
fn cooling_fillmap_monotonic_in_frequency() {
    let rated = RatedValues::from_power_capacity(0.79, 3.52);
    let filled = PerformanceMap::new(cooling_table())
        .set_entries(Freq, frequency_entries())
        .set_mode("cooling")
        .unwrap()
        .fillmap(Some(&rated))
        .unwrap();

    // Within one operating point, power must grow with frequency.
    let freq = filled.table().level_values(Freq).unwrap();
    let power = filled.table().column(Power).unwrap();
    // Rows are sorted, so consecutive rows of a block only differ in freq.
    for window in 0..filled.table().n_rows() - 1 {
        if freq[window + 1] > freq[window] {
            assert!(power[window + 1] > power[window]);
        }
    }
}

#[test]
fn fillmap_requires_cooling_corrections_for_wet_bulb() {
    // A map whose corrections were installed for heating cannot fill a
    // cooling table after a mode switch, because the kept corrections
    // have no wet-bulb curves.
    let heating_first = PerformanceMap::new(cooling_table())
        .set_mode("heating")
        .unwrap();
    let switched = heating_first.set_mode("cooling").unwrap();
    assert!(switched.fillmap(None).is_err());
}
