use crate::TrackPoint;

const HEADER: [&str; 8] = [
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<gpx version="1.1" creator="activities_processor""#,
    r#"  xmlns="http://www.topografix.com/GPX/1/1""#,
    r#"  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#,
    r#"  xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#,
    "  <trk>",
    "    <name>Activity</name>",
    "    <trkseg>",
];

const FOOTER: [&str; 3] = ["    </trkseg>", "  </trk>", "</gpx>"];

/// Single track, single segment GPX 1.1 document.
pub fn write_gpx(points: &[TrackPoint]) -> String {
    let mut lines: Vec<String> = HEADER.iter().map(|l| l.to_string()).collect();

    for pt in points {
        lines.push(format!(
            r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
            pt.lat, pt.lon
        ));
        if let Some(ele) = pt.ele {
            lines.push(format!("        <ele>{ele:.1}</ele>"));
        }
        if let Some(time) = pt.time {
            lines.push(format!(
                "        <time>{}</time>",
                time.format("%Y-%m-%dT%H:%M:%SZ")
            ));
        }
        lines.push("      </trkpt>".into());
    }

    lines.extend(FOOTER.iter().map(|l| l.to_string()));
    lines.join("\n")
}
