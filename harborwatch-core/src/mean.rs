pub trait Mean<T> {
    fn mean(self) -> Option<T>;
}

macro_rules! float_mean {
    ($($num:ty)*) => ($(
        impl<I> Mean<$num> for I
        where
            I: Iterator<Item = $num>
        {
            fn mean(mut self) -> Option<$num> {
                let first = self.next()?;
                let (sum, count) = self.fold((first, 1), |(sum, count), next| {
                    (sum + next, count + 1)
                });
                Some(sum / count as $num)
            }
        }
    )*)
}

float_mean! { f32 f64 }
