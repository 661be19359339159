use crate::depacketizer::access_unit::AccessUnit;

/// Consumer of reconstructed access units. Called synchronously, in
/// sequence order, on the thread that submitted the packet.
pub trait AccessUnitSink {
    fn on_access_unit(&mut self, unit: AccessUnit);
}

impl<F> AccessUnitSink for F
where
    F: FnMut(AccessUnit),
{
    fn on_access_unit(&mut self, unit: AccessUnit) {
        self(unit)
    }
}
