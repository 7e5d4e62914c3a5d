//! Reshape the two NIWA series into the frontend's `{time, sunny, cloudy}` list.

use chrono::{DateTime, Utc};
use chrono_tz::Pacific::Auckland;

use crate::{NiwaResponse, ProductId, UvError, UvReading, model::ValuePair};

/// 24 hours of 15-minute samples.
pub const WINDOW_LEN: usize = 96;

pub fn transform(response: &NiwaResponse) -> Result<Vec<UvReading>, UvError> {
    let clear_sky = select_series(response, ProductId::ClearSky)?;
    let cloudy_sky = select_series(response, ProductId::CloudySky)?;

    if clear_sky.len() != cloudy_sky.len() {
        return Err(UvError::SeriesMismatch {
            clear_sky: clear_sky.len(),
            cloudy_sky: cloudy_sky.len(),
        });
    }

    if let Some((index, (clear, cloudy))) = clear_sky
        .iter()
        .zip(cloudy_sky)
        .enumerate()
        .find(|(_, (clear, cloudy))| clear.time != cloudy.time)
    {
        return Err(UvError::MisalignedSample {
            index,
            clear_sky: clear.time,
            cloudy_sky: cloudy.time,
        });
    }

    let window = clear_sky.len().min(WINDOW_LEN);
    warn_if_spans_days(&clear_sky[..window]);

    Ok(clear_sky
        .iter()
        .zip(cloudy_sky)
        .take(WINDOW_LEN)
        .map(|(clear, cloudy)| UvReading {
            time: local_time_of_day(clear.time),
            sunny: clear.value,
            cloudy: cloudy.value,
        })
        .collect())
}

/// Pacific/Auckland wall-clock time as `HH:MM:SS`.
pub fn local_time_of_day(time: DateTime<Utc>) -> String {
    time.with_timezone(&Auckland).format("%H:%M:%S").to_string()
}

/// Look a series up by name; unnamed payloads fall back to product order.
fn select_series(response: &NiwaResponse, id: ProductId) -> Result<&[ValuePair], UvError> {
    let any_named = response.products.iter().any(|p| p.name.is_some());

    let product = if any_named {
        response.products.iter().find(|p| {
            p.name
                .as_deref()
                .and_then(|name| ProductId::try_from(name).ok())
                == Some(id)
        })
    } else {
        response.products.get(id.legacy_index())
    };

    product
        .map(|p| p.values.as_slice())
        .ok_or(UvError::MissingProduct(id))
}

// Output drops the date, so a window crossing local midnight repeats times of day.
fn warn_if_spans_days(window: &[ValuePair]) {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return;
    };

    let first_day = first.time.with_timezone(&Auckland).date_naive();
    let last_day = last.time.with_timezone(&Auckland).date_naive();

    if first_day != last_day {
        tracing::warn!(%first_day, %last_day, "UV window spans more than one local date");
    }
}
