//! 位置情報の取得（起動時に一度だけ）
//!
//! 許可されたら座標を保存して最初の読み込みへ、拒否・未対応なら
//! 既定座標のまま即座に最初の読み込みへ進む。どちらの経路でも
//! コールバックはちょうど一度呼ばれる

use machimeshi_common::GeoPoint;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Position, PositionError};

type Ready = Box<dyn FnOnce(Option<GeoPoint>)>;

/// 現在地を一度だけ問い合わせる
pub fn locate(on_ready: impl FnOnce(Option<GeoPoint>) + 'static) {
    let slot: Rc<RefCell<Option<Ready>>> = Rc::new(RefCell::new(Some(Box::new(on_ready))));

    let Some(window) = web_sys::window() else {
        fire(&slot, None);
        return;
    };
    let geolocation = match window.navigator().geolocation() {
        Ok(g) => g,
        Err(_) => {
            // 位置情報非対応のブラウザ。既定座標で続行
            fire(&slot, None);
            return;
        }
    };

    let success = {
        let slot = slot.clone();
        Closure::wrap(Box::new(move |pos: Position| {
            let coords = pos.coords();
            let point = GeoPoint {
                lat: coords.latitude(),
                lon: coords.longitude(),
            };
            fire(&slot, Some(point));
        }) as Box<dyn FnMut(Position)>)
    };
    let failure = {
        let slot = slot.clone();
        Closure::wrap(Box::new(move |_err: PositionError| {
            fire(&slot, None);
        }) as Box<dyn FnMut(PositionError)>)
    };

    let requested = geolocation.get_current_position_with_error_callback(
        success.as_ref().unchecked_ref(),
        Some(failure.as_ref().unchecked_ref()),
    );
    if requested.is_err() {
        fire(&slot, None);
    }

    success.forget();
    failure.forget();
}

fn fire(slot: &Rc<RefCell<Option<Ready>>>, point: Option<GeoPoint>) {
    if let Some(on_ready) = slot.borrow_mut().take() {
        on_ready(point);
    }
}
