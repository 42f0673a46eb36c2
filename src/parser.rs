//! Sensor record parser.
//!
//! The MCU reports one reading per line in the fixed pipe-delimited form
//! `|<humidity>|<temperature>|<adc>|`, e.g. `|50.50|25.00|800|`. Anything
//! else is rejected; there is no partial-reading fallback and a rejected
//! frame never resurrects the previous reading.

use serde::Serialize;

use crate::error::ParseError;
use crate::framer::Frame;

/// One parsed sensor report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    /// Relative humidity, percent.
    pub humidity: f32,
    /// Ambient temperature, degrees Celsius.
    pub temperature_c: f32,
    /// Raw CO-sensor ADC count.
    pub adc: i32,
}

/// Parse a completed frame against the `|f|f|d|` pattern.
///
/// Exactly three numeric fields between a leading and trailing `|`.
/// No whitespace tolerance beyond what numeric `from_str` allows (none).
pub fn parse(frame: &Frame) -> Result<SensorReading, ParseError> {
    // A frame with non-UTF-8 bytes cannot contain a valid numeric field.
    let text = frame.as_str().ok_or(ParseError::MalformedNumber)?;

    let inner = text
        .strip_prefix('|')
        .and_then(|rest| rest.strip_suffix('|'))
        .ok_or(ParseError::FieldCountMismatch)?;

    let mut fields = inner.split('|');
    let (Some(hum), Some(temp), Some(adc), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::FieldCountMismatch);
    };

    Ok(SensorReading {
        humidity: hum.parse().map_err(|_| ParseError::MalformedNumber)?,
        temperature_c: temp.parse().map_err(|_| ParseError::MalformedNumber)?,
        adc: adc.parse().map_err(|_| ParseError::MalformedNumber)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(content: &str) -> Frame {
        Frame::from_slice(content.as_bytes())
    }

    #[test]
    fn well_formed_record() {
        let reading = parse(&frame("|50.50|25.00|800|")).unwrap();
        assert_eq!(
            reading,
            SensorReading {
                humidity: 50.50,
                temperature_c: 25.00,
                adc: 800,
            }
        );
    }

    #[test]
    fn integer_floats_accepted() {
        let reading = parse(&frame("|50|25|0|")).unwrap();
        assert_eq!(reading.adc, 0);
        assert!((reading.humidity - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        assert_eq!(
            parse(&frame("|abc|25.00|800|")),
            Err(ParseError::MalformedNumber)
        );
    }

    #[test]
    fn two_fields_is_count_mismatch() {
        assert_eq!(
            parse(&frame("|50.50|25.00|")),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn four_fields_is_count_mismatch() {
        assert_eq!(
            parse(&frame("|1|2|3|4|")),
            Err(ParseError::FieldCountMismatch)
        );
    }

    #[test]
    fn missing_delimiters_rejected() {
        assert_eq!(
            parse(&frame("50.50|25.00|800")),
            Err(ParseError::FieldCountMismatch)
        );
        assert_eq!(parse(&frame("")), Err(ParseError::FieldCountMismatch));
    }

    #[test]
    fn interior_whitespace_rejected() {
        assert_eq!(
            parse(&frame("| 50.50|25.00|800|")),
            Err(ParseError::MalformedNumber)
        );
    }

    #[test]
    fn non_utf8_frame_is_malformed() {
        let raw = Frame::from_slice(&[b'|', 0xff, 0xfe, b'|']);
        assert_eq!(parse(&raw), Err(ParseError::MalformedNumber));
    }

    #[test]
    fn negative_temperature_accepted() {
        let reading = parse(&frame("|33.00|-4.50|120|")).unwrap();
        assert!((reading.temperature_c - -4.5).abs() < f32::EPSILON);
    }
}
