use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{self, Operation as SpiOperation, SpiDevice};
use page_display::{
    AnyController, Axis, Builder, Canvas, ControllerKind, Dimensions, DisplayManager, Error,
    FillOptions, Graph, Interface, InterfaceError, NoBacklight, Operation, PixelMask,
    ProportionalFont, Rotation, Ssd1306,
};

/// Bytes seen on the bus, tagged with the D/C level at the time
#[derive(Debug, Default)]
struct Bus {
    dc_high: bool,
    fail: bool,
    commands: Vec<u8>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct RecordingSpi(Rc<RefCell<Bus>>);

#[derive(Debug, PartialEq)]
struct SpiFault;

impl spi::Error for SpiFault {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl spi::ErrorType for RecordingSpi {
    type Error = SpiFault;
}

impl SpiDevice for RecordingSpi {
    fn transaction(&mut self, operations: &mut [SpiOperation<'_, u8>]) -> Result<(), SpiFault> {
        let mut bus = self.0.borrow_mut();
        if bus.fail {
            return Err(SpiFault);
        }
        for op in operations {
            if let SpiOperation::Write(bytes) = op {
                if bus.dc_high {
                    bus.data.extend_from_slice(bytes);
                } else {
                    bus.commands.extend_from_slice(bytes);
                }
            }
        }
        Ok(())
    }
}

struct DcPin(Rc<RefCell<Bus>>);

impl embedded_hal::digital::ErrorType for DcPin {
    type Error = Infallible;
}

impl OutputPin for DcPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().dc_high = true;
        Ok(())
    }
}

struct Pin;

impl embedded_hal::digital::ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

type TestInterface = Interface<RecordingSpi, DcPin, Pin>;

fn interface() -> (TestInterface, Rc<RefCell<Bus>>) {
    let bus = Rc::new(RefCell::new(Bus::default()));
    let interface = Interface::new(RecordingSpi(bus.clone()), DcPin(bus.clone()), Pin);
    (interface, bus)
}

fn panel(
    kind: ControllerKind,
    rotation: Rotation,
) -> (
    DisplayManager<AnyController<TestInterface, NoBacklight>, Vec<u8>>,
    Rc<RefCell<Bus>>,
) {
    let config = Builder::new()
        .controller(kind)
        .dimensions(Dimensions::new(64, 128).unwrap())
        .rotation(rotation)
        .build()
        .unwrap();
    let (interface, bus) = interface();
    let controller = AnyController::new(interface, &config, None);
    let display =
        DisplayManager::from_config(controller, vec![0u8; config.dimensions.buffer_size()], &config);
    (display, bus)
}

#[test]
fn init_clears_the_panel_over_the_bus() {
    for kind in [ControllerKind::Ssd1306, ControllerKind::St7565r] {
        let (mut display, bus) = panel(kind, Rotation::Rotate0);
        display.init(&mut NoDelay).unwrap();
        let bus = bus.borrow();
        assert_eq!(bus.data.len(), 1024, "{kind:?}");
        assert!(bus.data.iter().all(|b| *b == 0));
        assert!(bus.commands.contains(&0xAF));
        for page in 0..8 {
            for column in 0..128 {
                assert_eq!(display.read_byte(page, column).unwrap(), 0);
            }
        }
    }
}

#[test]
fn pixel_write_goes_through_to_hardware() {
    let (mut display, bus) = panel(ControllerKind::Ssd1306, Rotation::Rotate0);
    display.write_byte(2, 40, 0b1000_0001).unwrap();
    bus.borrow_mut().commands.clear();
    bus.borrow_mut().data.clear();

    display.draw_pixel(40, 19, PixelMask::Set).unwrap();
    assert_eq!(display.read_byte(2, 40).unwrap(), 0b1000_1001);
    let bus = bus.borrow();
    // page 2, column 0x28 high/low nibble, then the merged byte
    assert_eq!(bus.commands, [0xB2, 0x12, 0x08]);
    assert_eq!(bus.data, [0b1000_1001]);
}

#[test]
fn solid_rect_sets_exact_area() {
    let (mut display, _bus) = panel(ControllerKind::St7565r, Rotation::Rotate0);
    display
        .draw_rect(10, 10, 20, 10, FillOptions::Solid, 1, PixelMask::Set)
        .unwrap();
    for y in 0..64 {
        for x in 0..128 {
            let inside = (10..30).contains(&x) && (10..20).contains(&y);
            assert_eq!(display.pixel(x, y), Some(inside), "({x}, {y})");
        }
    }
}

#[test]
fn toggled_circle_is_undone_by_second_toggle() {
    let (mut display, _bus) = panel(ControllerKind::Ssd1306, Rotation::Rotate180);
    display
        .draw_rect(0, 0, 64, 32, FillOptions::Solid, 1, PixelMask::Set)
        .unwrap();
    let before = display.buffer().to_vec();
    for _ in 0..2 {
        display
            .draw_circle(40, 30, 25, FillOptions::Solid, PixelMask::Toggle)
            .unwrap();
    }
    assert_eq!(display.buffer(), &before[..]);
}

#[test]
fn graph_full_scale_bar() {
    let (mut display, _bus) = panel(ControllerKind::St7565r, Rotation::Rotate0);
    let mut graph = Graph::init(&mut display, &ProportionalFont, 0, 0, "T", 100).unwrap();
    let plot = graph.plot_region();
    graph.update(&mut display, 150).unwrap();
    for y in 0..64 {
        assert_eq!(display.pixel(plot.x, y), Some(true));
        assert_eq!(display.pixel(plot.x + 1, y), Some(false));
    }
    assert_eq!(graph.start(), 1);
}

#[test]
fn missing_capability_is_reported() {
    let (mut display, _bus) = panel(ControllerKind::Ssd1306, Rotation::Rotate0);
    assert!(matches!(
        display.switch_backlight(true),
        Err(Error::Unsupported(Operation::SwitchBacklight))
    ));
    assert!(matches!(
        display.clear_line(8),
        Err(Error::OutOfRange {
            axis: Axis::Page,
            value: 8,
            limit: 8
        })
    ));
}

#[test]
fn transport_failure_surfaces_from_write_byte() {
    let config = Builder::new()
        .dimensions(Dimensions::new(32, 128).unwrap())
        .build()
        .unwrap();
    let (interface, bus) = interface();
    let mut display = DisplayManager::new(Ssd1306::new(interface, &config), vec![0u8; 512]);
    bus.borrow_mut().fail = true;
    assert!(matches!(
        display.write_byte(0, 0, 0xFF),
        Err(Error::Transport(InterfaceError::Spi(SpiFault)))
    ));
    assert_eq!(display.read_byte(0, 0).unwrap(), 0xFF);
}
