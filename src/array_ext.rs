use ndarray::Array1;

pub trait Peak {
    // Index of the largest finite entry, first one wins on ties.
    fn argmax_finite(&self) -> Option<usize>;
}

impl Peak for Array1<f64> {
    fn argmax_finite(&self) -> Option<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, x)| x.is_finite())
            .fold(None, |best: Option<(usize, f64)>, (n, &x)| match best {
                Some((_, y)) if x.total_cmp(&y).is_le() => best,
                _ => Some((n, x)),
            })
            .map(|(n, _)| n)
    }
}
