//! DHT22 (AM2302) temperature/humidity sensor driver.
//!
//! Single-wire protocol: the MCU pulls the line low for ≥1 ms to start a
//! transaction, then the sensor clocks out 40 bits (16 humidity, 16
//! temperature, 8 checksum) encoded in high-pulse widths.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the bus on the configured GPIO with interrupts
//! masked for the duration of the frame.
//! On host/test: returns an injected simulated reading.
//!
//! A failed or corrupt read yields NaN in both fields; the [`SensorHub`]
//! (crate::sensors::SensorHub) turns that into an invalid snapshot.

#[cfg(not(target_os = "espidf"))]
use core::cell::Cell;

/// Which physical sensor a driver instance talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Inside,
    Outside,
}

/// One decoded sensor frame. NaN fields signal a failed read.
#[derive(Debug, Clone, Copy)]
pub struct DhtReading {
    /// Temperature (°C).
    pub temperature: f32,
    /// Relative humidity (%).
    pub humidity: f32,
}

impl DhtReading {
    /// The fault value: both fields NaN.
    pub fn invalid() -> Self {
        Self {
            temperature: f32::NAN,
            humidity: f32::NAN,
        }
    }
}

pub struct Dht22Sensor {
    channel: Channel,
    #[cfg(not(target_os = "espidf"))]
    sim: Cell<DhtReading>,
}

impl Dht22Sensor {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            #[cfg(not(target_os = "espidf"))]
            sim: Cell::new(DhtReading::invalid()),
        }
    }

    /// The channel this driver reads.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Read one frame from the sensor.
    /// Returns [`DhtReading::invalid`] on any bus or checksum error.
    pub fn read(&mut self) -> DhtReading {
        self.read_hw()
    }

    /// Inject the next simulated reading (host targets only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set(&self, temperature: f32, humidity: f32) {
        self.sim.set(DhtReading {
            temperature,
            humidity,
        });
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_hw(&mut self) -> DhtReading {
        self.sim.get()
    }

    #[cfg(target_os = "espidf")]
    fn read_hw(&mut self) -> DhtReading {
        let gpio = match self.channel {
            Channel::Inside => crate::pins::DHT_INSIDE_GPIO,
            Channel::Outside => crate::pins::DHT_OUTSIDE_GPIO,
        };
        match crate::drivers::hw_init::dht_read_frame(gpio) {
            Ok(frame) => Self::decode(frame),
            Err(_) => DhtReading::invalid(),
        }
    }

    /// Decode a 5-byte DHT22 frame into physical units.
    /// Byte 4 is the additive checksum of bytes 0..=3.
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    fn decode(frame: [u8; 5]) -> DhtReading {
        let sum = frame[0]
            .wrapping_add(frame[1])
            .wrapping_add(frame[2])
            .wrapping_add(frame[3]);
        if sum != frame[4] {
            return DhtReading::invalid();
        }

        let raw_hum = u16::from_be_bytes([frame[0], frame[1]]);
        let raw_temp = u16::from_be_bytes([frame[2], frame[3]]);

        let humidity = raw_hum as f32 / 10.0;
        // Bit 15 of the temperature word is the sign flag.
        let temperature = if raw_temp & 0x8000 != 0 {
            -((raw_temp & 0x7FFF) as f32) / 10.0
        } else {
            raw_temp as f32 / 10.0
        };

        DhtReading {
            temperature,
            humidity,
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn unset_sim_reads_invalid() {
        let mut s = Dht22Sensor::new(Channel::Inside);
        let r = s.read();
        assert!(r.temperature.is_nan());
        assert!(r.humidity.is_nan());
    }

    #[test]
    fn sim_reading_round_trips() {
        let mut s = Dht22Sensor::new(Channel::Outside);
        s.sim_set(21.5, 63.0);
        let r = s.read();
        assert_eq!(r.temperature, 21.5);
        assert_eq!(r.humidity, 63.0);
    }

    #[test]
    fn decode_positive_temperature() {
        // 55.2 %RH, 24.8 °C
        let frame = [0x02, 0x28, 0x00, 0xF8, 0x02u8.wrapping_add(0x28).wrapping_add(0xF8)];
        let r = Dht22Sensor::decode(frame);
        assert!((r.humidity - 55.2).abs() < 0.01);
        assert!((r.temperature - 24.8).abs() < 0.01);
    }

    #[test]
    fn decode_negative_temperature() {
        // -10.1 °C → 0x8065
        let frame = [0x01, 0x90, 0x80, 0x65, 0x01u8
            .wrapping_add(0x90)
            .wrapping_add(0x80)
            .wrapping_add(0x65)];
        let r = Dht22Sensor::decode(frame);
        assert!((r.temperature + 10.1).abs() < 0.01);
    }

    #[test]
    fn bad_checksum_reads_invalid() {
        let frame = [0x02, 0x28, 0x00, 0xF8, 0x00];
        let r = Dht22Sensor::decode(frame);
        assert!(r.temperature.is_nan());
    }
}
