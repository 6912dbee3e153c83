use crate::modules::foo::intent::FooIntent;
use crate::modules::foo::state::FooState;
use crate::mvi::Reducer;

pub struct FooReducer;

impl Reducer for FooReducer {
    type State = FooState;
    type Intent = FooIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FooIntent::AddBar(bar) => {
                let mut bars = state.bars;
                bars.push(bar);
                FooState { bars }
            }
            FooIntent::RemoveBar(bar) => FooState {
                bars: state.bars.into_iter().filter(|b| *b != bar).collect(),
            },
        }
    }
}
