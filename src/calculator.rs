use crate::display::*;
use crate::error_handling::*;
use crate::evaluating::*;
use crate::parsing::*;
use crate::scanning::strip_whitespace;
use std::str::FromStr;
use tracing::{debug, warn};

/// A single key on the calculator's keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    digit(u8),
    dot,
    negative,
    binary(BinaryOperator),
    unary(UnaryOperator),
    equals,
    clear,
}

impl FromStr for Key {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use Key::*;
        match s {
            "." => return Ok(dot),
            "+/-" | "±" => return Ok(negative),
            "=" => return Ok(equals),
            "C" | "c" | "CE" | "ce" => return Ok(clear),
            _ => {},
        }
        if let [digit_char @ b'0'..=b'9'] = s.as_bytes() {
            return Ok(digit(digit_char - b'0'));
        }
        if let Ok(operator) = s.parse() {
            return Ok(unary(operator));
        }
        if let Ok(operator) = s.parse() {
            return Ok(binary(operator));
        }
        Err(CalcError::did_not_expect(s.into()))
    }
}

/// Pocket calculator session: what the screen shows, the operation waiting
/// for its right operand, and every result produced so far.
#[derive(Debug, Default)]
pub struct Calculator {
    screen: DisplayValue,
    latest_value: f64,
    latest_operation: Option<BinaryOperator>,
    history: Vec<String>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_screen(&self) -> &str {
        self.screen.as_str()
    }

    pub fn screen(&self) -> &DisplayValue {
        &self.screen
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn pending_operation(&self) -> Option<BinaryOperator> {
        self.latest_operation
    }

    pub fn latest_value(&self) -> f64 {
        self.latest_value
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::digit(digit) => self.press_digit_key(digit),
            Key::dot => self.press_dot_key(),
            Key::negative => self.press_negative_key(),
            Key::binary(operator) => self.press_binary_operation_key(operator),
            Key::unary(operator) => self.press_unary_operation_key(operator),
            Key::equals => self.press_equals_key(),
            Key::clear => self.press_clear_key(),
        }
    }

    /// Replaces the screen with the digit. Digits do not accumulate, and
    /// values above 9 are not keys and are ignored.
    pub fn press_digit_key(&mut self, digit: u8) {
        if digit > 9 {
            warn!(digit, "no such digit key");
            return;
        }
        debug!(digit, "digit key");
        self.screen = DisplayValue::number(digit.to_string());
    }

    pub fn press_dot_key(&mut self) {
        if let DisplayValue::number(text) = &mut self.screen {
            if !text.contains('.') {
                text.push('.');
            }
        }
    }

    pub fn press_negative_key(&mut self) {
        if let DisplayValue::number(text) = &mut self.screen {
            *text = match text.strip_prefix('-') {
                Some(positive) => positive.to_string(),
                None => format!("-{}", text),
            };
        }
    }

    pub fn press_binary_operation_key(&mut self, operator: BinaryOperator) {
        let Some(value) = self.screen.value() else {
            warn!(%operator, "operator pressed while the screen shows an error");
            return;
        };
        debug!(%operator, value, "binary operation key");
        self.latest_value = value;
        self.latest_operation = Some(operator);
    }

    /// Applies the operator to the screen at once. NaN or infinite results
    /// show the error sentinel instead.
    pub fn press_unary_operation_key(&mut self, operator: UnaryOperator) {
        let Some(value) = self.screen.value() else {
            return;
        };
        self.screen = DisplayValue::from_unary_value(operator.call(value));
        debug!(%operator, value, screen = %self.screen, "unary operation key");
        if self.screen.is_error() {
            warn!(%operator, value, "unary operation has no finite result");
        }
    }

    /// Applies the pending operation to the stored value and the screen.
    /// The operation stays pending, so pressing equals again repeats it
    /// against the new screen. Dividing by zero shows the error sentinel.
    pub fn press_equals_key(&mut self) {
        let Some(operator) = self.latest_operation else {
            return;
        };
        let Some(second) = self.screen.value() else {
            return;
        };

        let result = if operator == BinaryOperator::division && second == 0.0 {
            f64::INFINITY
        } else {
            operator.call(self.latest_value, second)
        };

        self.screen = DisplayValue::from_value(result);
        debug!(left = self.latest_value, right = second, %operator, screen = %self.screen, "equals key");
        match &self.screen {
            DisplayValue::number(text) => self.history.push(text.clone()),
            DisplayValue::error => warn!(%operator, "equals produced no finite result"),
        }
    }

    pub fn press_clear_key(&mut self) {
        debug!("clear key");
        self.screen = DisplayValue::default();
        self.latest_operation = None;
        self.latest_value = 0.0;
    }

    /// Evaluates a whole line of text. Input with parentheses honors
    /// precedence; input without them is reduced strictly left to right.
    /// On failure the screen and history are left as they were.
    pub fn parse_and_calculate(&mut self, input: &str) -> Result<()> {
        let input = strip_whitespace(input);
        let strategy = Strategy::for_input(&input);
        let value = strategy.evaluate(&input)?;

        self.screen = DisplayValue::from_value(value);
        debug!(input = %input, ?strategy, screen = %self.screen, "calculated");
        match &self.screen {
            DisplayValue::number(text) => self.history.push(text.clone()),
            DisplayValue::error => warn!(input = %input, "calculation has no finite result"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn press_all(calculator: &mut Calculator, keys: &str) -> Result<()> {
        for key in keys.split_whitespace() {
            calculator.press(key.parse()?);
        }
        Ok(())
    }

    #[test]
    fn test_digit_replaces_screen() {
        let mut calculator = Calculator::new();
        calculator.press_digit_key(1);
        calculator.press_digit_key(2);
        assert_eq!(calculator.read_screen(), "2");
        calculator.press_digit_key(42);
        assert_eq!(calculator.read_screen(), "2");
        assert_eq!(calculator.screen(), &DisplayValue::number("2".into()));
    }

    #[test]
    fn test_dot_key() {
        let mut calculator = Calculator::new();
        calculator.press_digit_key(3);
        calculator.press_dot_key();
        calculator.press_dot_key();
        assert_eq!(calculator.read_screen(), "3.");
    }

    #[test]
    fn test_negative_key_toggles() {
        let mut calculator = Calculator::new();
        calculator.press_digit_key(4);
        calculator.press_negative_key();
        assert_eq!(calculator.read_screen(), "-4");
        calculator.press_negative_key();
        assert_eq!(calculator.read_screen(), "4");
    }

    #[test]
    fn test_binary_then_equals() -> Result<()> {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, "9 x 3 =")?;
        assert_eq!(calculator.read_screen(), "27");
        assert_eq!(calculator.history(), ["27"]);
        Ok(())
    }

    #[test]
    fn test_equals_divide_by_zero_shows_error() {
        let mut calculator = Calculator::new();
        calculator.press_digit_key(5);
        calculator.press_binary_operation_key(BinaryOperator::division);
        calculator.press_digit_key(0);
        calculator.press_equals_key();
        assert_eq!(calculator.read_screen(), "Error");
        assert!(calculator.history().is_empty());
    }

    #[test]
    fn test_repeat_equals_keeps_pending_operation() -> Result<()> {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, "2 + 3 =")?;
        assert_eq!(calculator.read_screen(), "5");
        calculator.press_equals_key();
        // the stored left operand is reused against the new screen
        assert_eq!(calculator.read_screen(), "7");
        assert_eq!(calculator.pending_operation(), Some(BinaryOperator::addition));
        Ok(())
    }

    #[test]
    fn test_equals_without_operation_is_identity() {
        let mut calculator = Calculator::new();
        calculator.press_digit_key(8);
        calculator.press_dot_key();
        calculator.press_equals_key();
        assert_eq!(calculator.read_screen(), "8.");
    }

    #[test]
    fn test_unary_keys() -> Result<()> {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, "9 √")?;
        assert_eq!(calculator.read_screen(), "3");
        press_all(&mut calculator, "5 %")?;
        assert_eq!(calculator.read_screen(), "0.05");
        press_all(&mut calculator, "3 1/x")?;
        assert_eq!(calculator.read_screen(), "0.33333333");
        press_all(&mut calculator, "0 1/x")?;
        assert_eq!(calculator.read_screen(), "Error");
        Ok(())
    }

    #[test]
    fn test_square_root_of_negative() {
        let mut calculator = Calculator::new();
        calculator.press_digit_key(4);
        calculator.press_negative_key();
        calculator.press_unary_operation_key(UnaryOperator::square_root);
        assert_eq!(calculator.read_screen(), "Error");
    }

    #[test]
    fn test_unary_does_not_disturb_pending_operation() -> Result<()> {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, "2 + 9 √ =")?;
        assert_eq!(calculator.read_screen(), "5");
        Ok(())
    }

    #[test]
    fn test_error_screen_ignores_keys_until_digit() -> Result<()> {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, "4 +/- √ . +/- + √ =")?;
        assert_eq!(calculator.read_screen(), "Error");
        assert_eq!(calculator.pending_operation(), None);
        press_all(&mut calculator, "6")?;
        assert_eq!(calculator.read_screen(), "6");
        Ok(())
    }

    #[test]
    fn test_clear_resets() -> Result<()> {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, "7 x 6")?;
        calculator.press_clear_key();
        assert_eq!(calculator.read_screen(), "0");
        assert_eq!(calculator.pending_operation(), None);
        assert_eq!(calculator.latest_value(), 0.0);
        calculator.press_equals_key();
        assert_eq!(calculator.read_screen(), "0");
        Ok(())
    }

    #[test]
    fn test_parse_and_calculate() -> Result<()> {
        let mut calculator = Calculator::new();
        calculator.parse_and_calculate("2 + 3 x 4")?;
        assert_eq!(calculator.read_screen(), "20");
        calculator.parse_and_calculate("2+(3x4)")?;
        assert_eq!(calculator.read_screen(), "14");
        calculator.parse_and_calculate("(4/2)")?;
        assert_eq!(calculator.read_screen(), "2");
        assert_eq!(calculator.history(), ["20", "14", "2"]);
        Ok(())
    }

    #[test]
    fn test_parse_and_calculate_failure_keeps_state() -> Result<()> {
        let mut calculator = Calculator::new();
        calculator.parse_and_calculate("1+1")?;
        assert_eq!(calculator.parse_and_calculate("5/0"), Err(CalcError::divide_by_zero));
        assert_eq!(
            calculator.parse_and_calculate("(2+3").map_err(|e| e.kind()),
            Err(ErrorKind::parse)
        );
        assert_eq!(calculator.read_screen(), "2");
        assert_eq!(calculator.history(), ["2"]);
        Ok(())
    }

    #[test]
    fn test_parse_and_calculate_overflow_shows_error() -> Result<()> {
        let mut calculator = Calculator::new();
        calculator.parse_and_calculate("1e308x10")?;
        assert_eq!(calculator.read_screen(), "Error");
        assert!(calculator.screen().is_error());
        assert!(calculator.history().is_empty());

        let huge = "9".repeat(400);
        for input in [format!("{}+1", huge), format!("({}+1)", huge)] {
            calculator.press_clear_key();
            calculator.parse_and_calculate(&input)?;
            assert_eq!(calculator.read_screen(), "Error", "{}", input);
            assert!(calculator.history().is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_key_parsing() -> Result<()> {
        assert_eq!("7".parse::<Key>()?, Key::digit(7));
        assert_eq!("-".parse::<Key>()?, Key::binary(BinaryOperator::subtraction));
        assert_eq!("1/x".parse::<Key>()?, Key::unary(UnaryOperator::reciprocal));
        assert_eq!("±".parse::<Key>()?, Key::negative);
        assert_eq!("C".parse::<Key>()?, Key::clear);
        assert_eq!("12".parse::<Key>(), Err(CalcError::did_not_expect("12".into())));
        Ok(())
    }
}
