//! Transform steps given on the command line as `name[:arg]`

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use stepseq_core::Sequence;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Stretch(usize),
    Shrink(usize),
    StretchBy(f64),
    ShrinkBy(f64),
    Expand(usize),
    Contract(usize),
    ExpandBy(f64),
    ContractBy(f64),
    Shift(i64),
    Reverse,
    Loop(i64),
    Undo(usize),
    Redo(usize),
    Reset,
}

fn arg<T: FromStr>(name: &str, raw: Option<&str>) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = raw.ok_or_else(|| anyhow!("`{name}` needs an argument, e.g. {name}:4"))?;
    raw.parse()
        .with_context(|| format!("bad argument `{raw}` for `{name}`"))
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (name, raw) = match s.split_once(':') {
            Some((name, raw)) => (name, Some(raw)),
            None => (s, None),
        };

        let op = match name {
            "stretch" => Self::Stretch(arg(name, raw)?),
            "shrink" => Self::Shrink(arg(name, raw)?),
            "stretch-by" => Self::StretchBy(arg(name, raw)?),
            "shrink-by" => Self::ShrinkBy(arg(name, raw)?),
            "expand" => Self::Expand(arg(name, raw)?),
            "contract" => Self::Contract(arg(name, raw)?),
            "expand-by" => Self::ExpandBy(arg(name, raw)?),
            "contract-by" => Self::ContractBy(arg(name, raw)?),
            "shift" => Self::Shift(arg(name, raw)?),
            "reverse" => Self::Reverse,
            "loop" => Self::Loop(raw.map_or(Ok(2), |_| arg(name, raw))?),
            "undo" => Self::Undo(raw.map_or(Ok(1), |_| arg(name, raw))?),
            "redo" => Self::Redo(raw.map_or(Ok(1), |_| arg(name, raw))?),
            "reset" => Self::Reset,
            _ => bail!("unknown operation `{name}`"),
        };
        Ok(op)
    }
}

impl Op {
    pub fn apply(self, seq: &mut Sequence) -> stepseq_core::Result<()> {
        match self {
            Self::Stretch(size) => {
                seq.stretch_to(size);
            }
            Self::Shrink(size) => {
                seq.shrink_to(size);
            }
            Self::StretchBy(mult) => {
                seq.stretch_by(mult)?;
            }
            Self::ShrinkBy(div) => {
                seq.shrink_by(div)?;
            }
            Self::Expand(size) => {
                seq.expand_to(size);
            }
            Self::Contract(size) => {
                seq.contract_to(size);
            }
            Self::ExpandBy(mult) => {
                seq.expand_by(mult)?;
            }
            Self::ContractBy(div) => {
                seq.contract_by(div)?;
            }
            Self::Shift(amount) => {
                seq.shift(amount);
            }
            Self::Reverse => {
                seq.reverse();
            }
            Self::Loop(n) => {
                seq.loop_n(n);
            }
            Self::Undo(depth) => {
                seq.undo(depth)?;
            }
            Self::Redo(depth) => {
                seq.redo(depth)?;
            }
            Self::Reset => {
                seq.reset()?;
            }
        }
        Ok(())
    }
}
