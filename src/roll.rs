use std::fmt::Display;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use crate::Error;

/// The largest `amount` whose individual values are recorded, by [`Dice::generate_values()`]
/// and by expression evaluation. Plain rolls are not limited.
pub const MAX_RECORDED_DICE: u32 = 1 << 20;

/// A dice term such as `3d6`: roll a die with `faces` sides `amount` times and sum the results.
///
/// A `Dice` is plain data; nothing is rolled until [`Dice::roll()`] (or one of its variants)
/// is called, which is what the postfix evaluator does the first time it meets the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    /// How many dice are rolled.
    pub amount: u32,
    /// The number of sides of each die.
    pub faces: u32
}

impl Dice {
    /// Creates a new dice term. No validation happens here, a zero `faces`
    /// is only rejected once the dice is rolled.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::Dice;
    ///
    /// let dice = Dice::new(3, 8);
    /// assert_eq!(dice.to_string(), "3d8");
    /// ```
    pub const fn new(amount: u32, faces: u32) -> Self {
        Self { amount, faces }
    }

    /// Rolls the dice using the process-wide generator and returns the sum.
    ///
    /// The generator is seeded once per process from the system clock the first time
    /// any dice is rolled without an explicit generator.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDice`] if `faces` is zero.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::Dice;
    ///
    /// let sum = Dice::new(2, 6).roll().unwrap();
    /// assert!((2.0..=12.0).contains(&sum));
    /// ```
    pub fn roll(&self) -> Result<f32, Error> {
        with_global_rng(|rng| self.roll_with(rng, None))
    }

    /// Rolls the dice using the process-wide generator, writing every individual
    /// die result into `results` in draw order.
    ///
    /// Only the first `min(results.len(), amount)` slots are written; the returned
    /// sum always covers all `amount` dice.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDice`] if `faces` is zero.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::Dice;
    ///
    /// let mut results = [0.0; 3];
    /// let sum = Dice::new(3, 4).roll_into(&mut results).unwrap();
    ///
    /// assert_eq!(sum, results.iter().sum::<f32>());
    /// assert!(results.iter().all(|r| (1.0..=4.0).contains(r)));
    /// ```
    pub fn roll_into(&self, results: &mut [f32]) -> Result<f32, Error> {
        with_global_rng(|rng| self.roll_with(rng, Some(results)))
    }

    /// Rolls the dice with a caller supplied generator.
    /// Individual results are written into `results` when given, see [`Dice::roll_into()`].
    ///
    /// Draws are streamed, nothing is allocated whatever the `amount`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDice`] if `faces` is zero.
    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R, results: Option<&mut [f32]>) -> Result<f32, Error> {
        let mut slots = results.into_iter().flatten();

        self.roll_each(rng, |value| {
            if let Some(slot) = slots.next() {
                *slot = value as f32;
            }
        })
    }

    /// Generates `amount` random die values, each between 1 and `faces` (inclusive).
    ///
    /// # Errors
    /// - [`Error::InvalidDice`] if `faces` is zero.
    /// - [`Error::TooManyDice`] if `amount` is above [`MAX_RECORDED_DICE`] or the values
    ///   cannot be allocated.
    pub fn generate_values<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<u32>, Error> {
        Ok(self.record_values(rng)?.0)
    }

    /// Rolls every die, keeping each value, and returns them with their sum.
    pub(crate) fn record_values<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Vec<u32>, f32), Error> {
        self.check_faces()?;

        if self.amount > MAX_RECORDED_DICE {
            return Err(Error::TooManyDice(*self));
        }

        let mut values = Vec::new();
        values.try_reserve_exact(self.amount as usize)
            .map_err(|_| Error::TooManyDice(*self))?;

        let sum = self.roll_each(rng, |value| values.push(value))?;
        Ok((values, sum))
    }

    /// Draws `amount` values, handing each to `each` in draw order, and returns their sum.
    fn roll_each<R: Rng + ?Sized>(&self, rng: &mut R, mut each: impl FnMut(u32)) -> Result<f32, Error> {
        self.check_faces()?;

        // (2^32 - 1)^2 still fits a u64
        let mut sum = 0u64;
        for _ in 0..self.amount {
            let value = rng.random_range(1..=self.faces);
            each(value);
            sum += u64::from(value);
        }

        Ok(sum as f32)
    }

    fn check_faces(&self) -> Result<(), Error> {
        if self.faces == 0 {
            return Err(Error::InvalidDice(*self));
        }

        Ok(())
    }

    /// The minimum possible sum of this dice term.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::Dice;
    ///
    /// assert_eq!(Dice::new(3, 20).min(), 3);
    /// assert_eq!(Dice::new(3, 0).min(), 0);
    /// ```
    pub const fn min(&self) -> u64 {
        if self.faces == 0 { 0 } else { self.amount as u64 }
    }

    /// The maximum possible sum of this dice term.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::Dice;
    ///
    /// assert_eq!(Dice::new(3, 20).max(), 60);
    /// ```
    pub const fn max(&self) -> u64 {
        self.amount as u64 * self.faces as u64
    }

    /// The average sum of this dice term.
    ///
    /// # Examples
    /// ```
    /// use postfix_dice::Dice;
    ///
    /// assert_eq!(Dice::new(1, 6).avg(), 3.5);
    /// ```
    pub fn avg(&self) -> f64 {
        (self.min() as f64 + self.max() as f64) / 2.0
    }
}

impl Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.amount, self.faces)
    }
}


fn global_rng() -> &'static Mutex<StdRng> {
    static RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();

    RNG.get_or_init(|| {
        let seed = clock_seed();
        log::debug!("seeding dice generator with {seed:#x}");
        Mutex::new(StdRng::seed_from_u64(seed))
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::from(elapsed.subsec_nanos()) ^ elapsed.as_secs())
        .unwrap_or_default()
}

/// Runs `f` with exclusive access to the process-wide generator.
pub(crate) fn with_global_rng<T>(f: impl FnOnce(&mut StdRng) -> T) -> T {
    let mut rng = global_rng()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    f(&mut *rng)
}
