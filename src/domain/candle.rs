use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

// A single OHLC bar, materialized on demand from the column-wise series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time_ms: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        open_time_ms: i64,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
    ) -> Self {
        Candle {
            open_time_ms,
            open_price,
            high_price,
            low_price,
            close_price,
        }
    }

    // A method to determine the type of candle
    pub fn get_type(&self) -> CandleType {
        if self.close_price >= self.open_price {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open_price, self.close_price),
            CandleType::Bearish => (self.close_price, self.open_price),
        }
    }

    /// Lower edge of the candle body (min of open/close).
    pub fn body_low(&self) -> f64 {
        self.body_range().0
    }

    /// Upper edge of the candle body (max of open/close).
    pub fn body_high(&self) -> f64 {
        self.body_range().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_range_orientation() {
        let bullish = Candle::new(0, 10.0, 12.0, 9.0, 11.0);
        assert_eq!(bullish.get_type(), CandleType::Bullish);
        assert_eq!(bullish.body_range(), (10.0, 11.0));

        let bearish = Candle::new(0, 11.0, 12.0, 9.0, 10.0);
        assert_eq!(bearish.get_type(), CandleType::Bearish);
        assert_eq!(bearish.body_range(), (10.0, 11.0));
    }

    #[test]
    fn test_doji_body_is_degenerate() {
        let doji = Candle::new(0, 10.0, 11.0, 9.0, 10.0);
        assert_eq!(doji.body_low(), doji.body_high());
    }
}
