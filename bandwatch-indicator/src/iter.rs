use super::Indicator;

// I: 上游数据源
// IND: 具体的指标逻辑
pub struct IndicatorIter<I, IND> {
    source: I,
    indicator: IND,
}

impl<I, IND> IndicatorIter<I, IND> {
    pub fn new(source: I, indicator: IND) -> Self {
        Self { source, indicator }
    }

    pub fn indicator(&self) -> &IND {
        &self.indicator
    }

    pub fn into_indicator(self) -> IND {
        self.indicator
    }
}

impl<I, IND> Iterator for IndicatorIter<I, IND>
where
    I: Iterator,
    IND: Indicator<Input = I::Item>,
{
    // 指标尚无输出时为 None
    type Item = Option<IND::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.source.next()?;
        Some(self.indicator.update(input))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

pub trait IndicatorExt: Iterator {
    fn apply<IND>(self, indicator: IND) -> IndicatorIter<Self, IND>
    where
        Self: Sized,
        IND: Indicator<Input = Self::Item>,
    {
        IndicatorIter::new(self, indicator)
    }
}

impl<I: Iterator> IndicatorExt for I {}
