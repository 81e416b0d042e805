use crate::domain::model::{ParsedFeed, ZooLocation};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;

/// 解析 map_zoos.php 的 TSV：第一列是表頭，之後每列為 `"<lat>,<lon>"\t<zoo_id>\t...`
///
/// 格式不對的列直接略過，只記數量，不會中斷整批資料。
pub fn parse_locations(tsv_text: &str) -> ParsedFeed {
    // 第一行是表頭，即使是空行也一樣丟掉；csv reader 會略過空行，所以先在原文上切掉
    let body = tsv_text.split_once('\n').map_or("", |(_, rest)| rest);

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut parsed = ParsedFeed::default();

    for (index, record) in reader.records().enumerate() {
        match record.ok().as_ref().and_then(parse_row) {
            Some(location) => parsed.locations.push(location),
            None => {
                tracing::debug!("Skipping malformed feed row {}", index + 2);
                parsed.discarded += 1;
            }
        }
    }

    parsed
}

fn parse_row(record: &StringRecord) -> Option<ZooLocation> {
    if record.len() < 2 {
        return None;
    }
    let lat_lon = record.get(0)?.trim();
    let zoo_id = record.get(1)?.trim();
    if lat_lon.is_empty() || zoo_id.is_empty() {
        return None;
    }

    let (lat, lon) = lat_lon.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    Some(ZooLocation {
        zoo_id: zoo_id.parse().ok()?,
        latitude,
        longitude,
    })
}

/// 每個 zoo_id 只保留第一次出現的座標，並依 zoo_id 由小到大排序
pub fn dedupe_by_zoo_id(locations: impl IntoIterator<Item = ZooLocation>) -> Vec<ZooLocation> {
    let mut by_id: BTreeMap<i64, ZooLocation> = BTreeMap::new();
    for location in locations {
        by_id.entry(location.zoo_id).or_insert(location);
    }
    by_id.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(zoo_id: i64, latitude: f64, longitude: f64) -> ZooLocation {
        ZooLocation {
            zoo_id,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_parse_skips_header_and_keeps_valid_rows() {
        let tsv = "latlon\tid\tname\n52.5200066,13.404954\t10000001\tZoo Berlin\n48.2,16.3\t10000002\tSchönbrunn\n";
        let parsed = parse_locations(tsv);

        assert_eq!(parsed.discarded, 0);
        assert_eq!(
            parsed.locations,
            vec![loc(10000001, 52.5200066, 13.404954), loc(10000002, 48.2, 16.3)]
        );
    }

    #[test]
    fn test_parse_discards_malformed_rows() {
        let tsv = [
            "header",
            "52.5,13.4\t1",
            "only-one-column",
            "\t2",
            "52.5,13.4\t",
            "52.5;13.4\t3",
            "north,13.4\t4",
            "52.5,13.4\tzoo",
            "nan,13.4\t5",
            " 50.0 , 8.25 \t 6 ",
        ]
        .join("\n");
        let parsed = parse_locations(&tsv);

        assert_eq!(parsed.locations, vec![loc(1, 52.5, 13.4), loc(6, 50.0, 8.25)]);
        assert_eq!(parsed.discarded, 7);
    }

    #[test]
    fn test_parse_splits_on_first_comma_only() {
        // 第二個逗號之後的內容會讓經度解析失敗
        let parsed = parse_locations("h\n1.5,2.5,3.5\t7\n");
        assert!(parsed.locations.is_empty());
        assert_eq!(parsed.discarded, 1);
    }

    #[test]
    fn test_parse_accepts_quoted_fields_and_blank_lines() {
        let parsed = parse_locations("h\n\n\"47.1,9.2\"\t8\n\n");
        assert_eq!(parsed.locations, vec![loc(8, 47.1, 9.2)]);
        assert_eq!(parsed.discarded, 0);
    }

    #[test]
    fn test_header_only_payload_is_empty() {
        assert_eq!(parse_locations("lat,lon\tzoo_id\n"), ParsedFeed::default());
        assert_eq!(parse_locations("lat,lon\tzoo_id"), ParsedFeed::default());
        assert_eq!(parse_locations(""), ParsedFeed::default());
    }

    #[test]
    fn test_leading_blank_line_counts_as_header() {
        let parsed = parse_locations("\n52.5,13.4\t1\n48.2,16.3\t2\n");
        assert_eq!(parsed.locations, vec![loc(1, 52.5, 13.4), loc(2, 48.2, 16.3)]);
        assert_eq!(parsed.discarded, 0);

        let parsed = parse_locations("\r\n50.0,8.0\t3\r\n");
        assert_eq!(parsed.locations, vec![loc(3, 50.0, 8.0)]);
    }

    #[test]
    fn test_dedupe_first_occurrence_wins() {
        let rows = vec![loc(5, 1.0, 2.0), loc(3, 9.0, 9.0), loc(5, 7.0, 8.0)];
        let deduped = dedupe_by_zoo_id(rows);

        assert_eq!(deduped, vec![loc(3, 9.0, 9.0), loc(5, 1.0, 2.0)]);
    }

    #[test]
    fn test_dedupe_output_is_strictly_ascending() {
        let rows = vec![
            loc(40, 0.0, 0.0),
            loc(-2, 0.0, 0.0),
            loc(17, 0.0, 0.0),
            loc(40, 1.0, 1.0),
            loc(3, 0.0, 0.0),
            loc(17, 1.0, 1.0),
        ];
        let ids: Vec<i64> = dedupe_by_zoo_id(rows).iter().map(|l| l.zoo_id).collect();

        assert_eq!(ids, vec![-2, 3, 17, 40]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
