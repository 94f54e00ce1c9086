//! 距離計算と距離表示

use crate::types::GeoPoint;

/// 既定の現在地。位置情報が取得できないセッションではこの座標のまま
pub const DEFAULT_POSITION: GeoPoint = GeoPoint {
    lat: 37.5665,
    lon: 126.978,
};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// 2点間の大円距離（メートル）
///
/// haversine公式。この用途では誤差は表示単位（0.1km）より十分小さい
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// 距離の表示文字列
///
/// 1km未満はメートル、以上は小数1桁のkm。末尾の".0"は省く
///
/// # Examples
/// ```
/// use machimeshi_common::format_distance;
///
/// assert_eq!(format_distance(950.0), "950m");
/// assert_eq!(format_distance(1500.0), "1.5km");
/// assert_eq!(format_distance(2000.0), "2km");
/// ```
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        return format!("{}m", rounded as i64);
    }
    // 0.1km単位に丸めてから表記を決める
    let tenth_km = (meters / 100.0).round() as i64;
    if tenth_km % 10 == 0 {
        format!("{}km", tenth_km / 10)
    } else {
        format!("{:.1}km", tenth_km as f64 / 10.0)
    }
}
