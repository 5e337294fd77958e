#[cfg(test)]
mod tests {
    use geo_types::{Coord, LineString};
    use rand::{rngs::ThreadRng, seq::IndexedRandom, *};
    use rusty_paths::*;

    const AREAS: [&str; 4] = ["Chilterns", "Cotswolds", "Peak District", ""];
    const TYPES: [&str; 3] = ["Bridleway", "Footpath", "Byway"];

    fn maybe<T>(value: T) -> Option<T> {
        random_bool(0.8).then_some(value)
    }

    fn random_path(id: Id) -> Path {
        let mut rng = rng();
        Path {
            id,
            source_fid: maybe(format!("fid-{id}")),
            route_code: maybe(format!("RC{}", random_range(1..999))),
            name: None,
            path_type: maybe(TYPES.choose(&mut rng).copied().unwrap_or_default().into()),
            area: maybe(AREAS.choose(&mut rng).copied().unwrap_or_default().into()),
            geom: maybe(LineString::from_iter((0..random_range(2..50)).map(|_| Coord {
                x: random_range(-5.0..1.0),
                y: random_range(50.0..55.0),
            }))),
            length_km: maybe(random_range(0.0..20.0)),
        }
    }

    fn random_paths() -> Paths {
        (0..500).map(random_path).collect()
    }

    fn random_filter() -> PathFilter {
        let mut rng = rng();
        let pick = |pool: &[&str], rng: &mut ThreadRng| {
            pool.choose_multiple(rng, random_range(0..=2))
                .map(|s| s.to_string())
                .collect()
        };
        PathFilter::new(pick(&AREAS, &mut rng), pick(&TYPES, &mut rng))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_filter_is_sound_and_complete() {
        let paths = random_paths();
        for _ in 0..50 {
            let filter = random_filter();
            let kept: Vec<&Path> = paths.filtered(&filter).collect();
            for p in &paths.rows {
                let included = kept.iter().any(|k| k.id == p.id);
                let area_ok = filter.area.is_empty()
                    || p.area.as_ref().is_some_and(|a| filter.area.contains(a));
                let type_ok = filter.path_type.is_empty()
                    || p.path_type.as_ref().is_some_and(|t| filter.path_type.contains(t));
                assert_eq!(included, area_ok && type_ok, "path {} with {filter:?}", p.id);
            }
        }
    }

    #[test]
    fn test_stats_groups_add_up() {
        let paths = random_paths();
        let stats = PathStats::from_paths(&paths.rows);
        assert_eq!(stats.total_paths, paths.len() as i64);

        for groups in [&stats.by_type, &stats.by_area] {
            let count: i64 = groups.values().map(|g| g.count).sum();
            let length: f64 = groups.values().map(|g| g.length_km).sum();
            assert_eq!(count, stats.total_paths);
            assert!(close(length, stats.total_length_km), "{length} vs {}", stats.total_length_km);
            assert!(!groups.contains_key(""));
        }
    }

    #[test]
    fn test_distinct_values_sorted_and_non_empty() {
        let paths = random_paths();
        let areas = distinct_values(paths.rows.iter().map(|p| p.area.as_deref()));
        assert!(areas.windows(2).all(|w| w[0] < w[1]));
        assert!(areas.iter().all(|a| !a.is_empty()));
        for p in &paths.rows {
            if let Some(area) = p.area.as_deref().filter(|a| !a.is_empty()) {
                assert!(areas.iter().any(|a| a == area));
            }
        }
    }

    #[test]
    fn test_features_carry_rounded_lengths() {
        let paths = random_paths();
        let collection: FeatureCollection = paths.rows.iter().cloned().collect();
        let json = serde_json::to_value(&collection).unwrap();
        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), paths.len());

        for (feature, path) in features.iter().zip(&paths.rows) {
            assert_eq!(feature["type"], "Feature");
            assert_eq!(feature["properties"]["id"], path.id);
            match path.length_km {
                Some(len) => assert_eq!(feature["properties"]["length_km"], round3(len)),
                None => assert!(feature["properties"]["length_km"].is_null()),
            }
            match &path.geom {
                Some(geom) => assert_eq!(
                    feature["geometry"]["coordinates"].as_array().unwrap().len(),
                    geom.0.len()
                ),
                None => assert!(feature["geometry"].is_null()),
            }
        }
    }
}
