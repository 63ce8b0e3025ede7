pub(crate) trait IterExt<'a>: Iterator + Sized {
    fn boxed(self) -> BoxedIter<'a, Self::Item>;
}

pub type BoxedIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

impl<'a, T: Iterator + Sized + 'a> IterExt<'a> for T {
    fn boxed(self) -> BoxedIter<'a, Self::Item> {
        Box::new(self)
    }
}
